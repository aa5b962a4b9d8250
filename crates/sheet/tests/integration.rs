use chartsheet_sheet::{
    is_blank_row, validate_upload, CellValue, FileInfo, PreviewOptions, SheetError, Table,
    UploadLimits,
};
use rust_xlsxwriter::Workbook;

fn sales_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Q1").unwrap();
    ws.write_string(0, 0, "Month").unwrap();
    ws.write_string(0, 1, "Sales").unwrap();
    ws.write_string(0, 2, "").unwrap();
    ws.write_string(1, 0, "Jan").unwrap();
    ws.write_number(1, 1, 100).unwrap();
    ws.write_string(1, 2, "north").unwrap();
    ws.write_string(3, 0, "Feb").unwrap();
    ws.write_string(4, 0, "Mar").unwrap();
    ws.write_string(4, 1, "250").unwrap();
    workbook.save_to_buffer().unwrap()
}

// ===== Validate then parse =====

#[test]
fn test_validated_upload_parses() {
    let bytes = sales_workbook();
    let info = FileInfo::new("q1.XLSX", None, bytes.len() as u64);
    validate_upload(&info, &UploadLimits::default()).unwrap();

    let table = Table::from_bytes(&bytes).unwrap();
    assert_eq!(table.sheet_name, "Q1");
    assert_eq!(table.headers, vec!["Month", "Sales", "Column"]);
    assert_eq!(table.row_count(), 3);
    assert!(table.rows.iter().all(|row| !is_blank_row(row)));
}

#[test]
fn test_oversized_upload_never_parsed() {
    let info = FileInfo::new("big.xlsx", None, 11 * 1024 * 1024);
    let err = validate_upload(&info, &UploadLimits::default()).unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, SheetError::FileTooLarge { .. }));
}

// ===== Parsed cells =====

#[test]
fn test_cells_keep_source_types() {
    let table = Table::from_bytes(&sales_workbook()).unwrap();

    assert_eq!(table.get(0, 1), Some(&CellValue::Float(100.0)));
    assert_eq!(table.get(1, 1), Some(&CellValue::Null));
    assert_eq!(table.get(2, 1), Some(&CellValue::String("250".to_string())));
    assert_eq!(table.get(2, 1).unwrap().coerce_number(), 250.0);
}

#[test]
fn test_table_survives_json_roundtrip() {
    let table = Table::from_bytes(&sales_workbook()).unwrap();
    let json = serde_json::to_string(&table).unwrap();
    let restored: Table = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, table);
}

// ===== Preview =====

#[test]
fn test_preview_of_parsed_table() {
    let table = Table::from_bytes(&sales_workbook()).unwrap();
    let preview = table.preview(0, &PreviewOptions::default().with_page_size(2));

    assert_eq!(preview.total_pages, 2);
    assert_eq!(preview.showing, "1-2");
    assert_eq!(preview.display_rows()[1], vec!["Feb", "—", "—"]);

    let second = table.preview(1, &PreviewOptions::default().with_page_size(2));
    assert_eq!(second.showing, "3-3");
}

// ===== Failures =====

#[test]
fn test_truncated_workbook_fails_to_parse() {
    let bytes = sales_workbook();
    let err = Table::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, SheetError::Parse(_)));
}

#[test]
fn test_empty_workbook_sheet() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();

    let err = Table::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse Excel file: Empty spreadsheet");
}
