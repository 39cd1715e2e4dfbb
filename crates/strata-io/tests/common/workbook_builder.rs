#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

/// Cell content for generated fixtures.
#[derive(Clone, Debug)]
pub enum Cell {
    Text(String),
    Num(f64),
    Blank,
}

pub fn t(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

pub fn n(v: f64) -> Cell {
    Cell::Num(v)
}

/// A worksheet described as a header row followed by data rows.
#[derive(Clone, Debug)]
pub struct SheetSpec {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

pub fn sheet(name: &str, header: &[&str], rows: Vec<Vec<Cell>>) -> SheetSpec {
    SheetSpec {
        name: name.to_string(),
        header: header.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// Write the sheets to an in-memory `.xlsx` file.
pub fn xlsx_bytes(sheets: &[SheetSpec]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&spec.name).expect("set worksheet name");
        for (col, header) in spec.header.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, header)
                .expect("write header");
        }
        for (r, row) in spec.rows.iter().enumerate() {
            let row_idx = (r + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        worksheet
                            .write_string(row_idx, col as u16, s)
                            .expect("write string");
                    }
                    Cell::Num(v) => {
                        worksheet
                            .write_number(row_idx, col as u16, *v)
                            .expect("write number");
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save_to_buffer().expect("write xlsx bytes")
}

/// A small RVTools export: three named VMs, one row with no VM name, and two disks.
pub fn rvtools_fixture() -> Vec<u8> {
    xlsx_bytes(&[
        sheet(
            "vInfo",
            &["VM", "Powerstate", "CPUs", "Memory", "Host", "Datacenter", "OS"],
            vec![
                vec![
                    t("web01"),
                    t("poweredOn"),
                    n(2.0),
                    n(4096.0),
                    t("esx01"),
                    t("DC1"),
                    t("Microsoft Windows Server 2019 (64-bit)"),
                ],
                vec![
                    t("db01"),
                    t("poweredOn"),
                    n(16.0),
                    n(65536.0),
                    t("esx02"),
                    t("DC1"),
                    t("Red Hat Enterprise Linux 8 (64-bit)"),
                ],
                vec![Cell::Blank, t("poweredOff"), n(1.0), n(1024.0)],
                vec![
                    t("app01"),
                    t("poweredOff"),
                    n(4.0),
                    n(8192.0),
                    t("esx01"),
                    t("DC2"),
                    t("FreeBSD"),
                ],
            ],
        ),
        sheet("vCPU", &["VM", "CPUs"], vec![vec![t("web01"), n(2.0)]]),
        sheet(
            "vDisk",
            &["VM", "Disk", "Capacity MB"],
            vec![
                vec![t("web01"), t("Hard disk 1"), n(40960.0)],
                vec![t("db01"), t("Hard disk 1"), n(102400.0)],
            ],
        ),
    ])
}

/// An Azure Migrate export with two machine sheets, one unrelated sheet and one sheet
/// that has a `Name` column but no Azure Migrate sheet name.
pub fn azmigrate_fixture() -> Vec<u8> {
    xlsx_bytes(&[
        sheet(
            "All_Servers",
            &["Server name", "Cores", "Memory in MB", "Operating system", "Location"],
            vec![
                vec![t("SRV-A"), n(4.0), n(8192.0), t("Windows Server 2016"), t("eastus")],
                vec![t("SRV-B"), n(12.0), n(16384.0), t("Ubuntu 20.04")],
                vec![Cell::Blank, n(2.0)],
            ],
        ),
        sheet(
            "Machine_Details",
            &["Display name", "vCPUs", "RAM (MB)"],
            vec![vec![t("srv-a"), n(4.0), n(8192.0)]],
        ),
        sheet(
            "Regions",
            &["Name", "Code"],
            vec![vec![t("East US"), t("eastus")]],
        ),
        sheet("Readme", &["Notes"], vec![vec![t("exported by Azure Migrate")]]),
    ])
}
