#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rust_xlsxwriter::Workbook;

pub enum Cell {
    Text(&'static str),
    Num(f64),
}

/// Write a workbook with one header row per sheet to `dir/file_name`.
pub fn write_workbook(
    dir: &Path,
    file_name: &str,
    sheets: &[(&str, &[&str], Vec<Vec<Cell>>)],
) -> PathBuf {
    let mut workbook = Workbook::new();
    for (name, header, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name");
        for (col, h) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *h).expect("header");
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                let (r, c) = ((r + 1) as u32, col as u16);
                let written = match cell {
                    Cell::Text(s) => worksheet.write_string(r, c, *s).map(|_| ()),
                    Cell::Num(v) => worksheet.write_number(r, c, *v).map(|_| ()),
                };
                written.expect("cell");
            }
        }
    }
    let path = dir.join(file_name);
    workbook.save(&path).expect("save workbook");
    path
}

const VINFO: &[&str] = &["VM", "Powerstate", "CPUs", "Memory", "Host", "OS"];
const VDISK: &[&str] = &["VM", "Capacity MB"];

/// RVTools export with `web01` (small, Windows) and `db01` (16 vCPU, Linux).
pub fn rvtools_workbook(dir: &Path, file_name: &str) -> PathBuf {
    use Cell::*;
    write_workbook(
        dir,
        file_name,
        &[
            (
                "vInfo",
                VINFO,
                vec![
                    vec![
                        Text("web01"),
                        Text("poweredOn"),
                        Num(2.0),
                        Num(4096.0),
                        Text("esx01"),
                        Text("Microsoft Windows Server 2019"),
                    ],
                    vec![
                        Text("db01"),
                        Text("poweredOn"),
                        Num(16.0),
                        Num(65536.0),
                        Text("esx02"),
                        Text("Red Hat Enterprise Linux 8"),
                    ],
                ],
            ),
            (
                "vDisk",
                VDISK,
                vec![vec![Text("web01"), Num(2048.0)]],
            ),
        ],
    )
}

/// RVTools export sharing `WEB01` with [`rvtools_workbook`] and adding `app01`.
pub fn second_rvtools_workbook(dir: &Path, file_name: &str) -> PathBuf {
    use Cell::*;
    write_workbook(
        dir,
        file_name,
        &[(
            "vInfo",
            VINFO,
            vec![
                vec![
                    Text("WEB01"),
                    Text("poweredOn"),
                    Num(2.0),
                    Num(4096.0),
                    Text("esx09"),
                    Text("Microsoft Windows Server 2019"),
                ],
                vec![
                    Text("app01"),
                    Text("poweredOff"),
                    Num(2.0),
                    Num(2048.0),
                    Text("esx09"),
                    Text("Ubuntu Linux"),
                ],
            ],
        )],
    )
}

pub fn strata() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_strata"));
    cmd.env_remove("STRATA_API_URL")
        .env_remove("STRATA_STATE_DIR")
        .env_remove("STRATA_CUSTOMER_ID")
        .env_remove("STRATA_DOC_CODE")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_ok(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run strata");
    assert!(
        output.status.success(),
        "expected success\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

pub fn run_err(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("run strata");
    assert!(!output.status.success(), "expected failure");
    output
}
