pub mod workbook_builder;
