use sheetref_core::{Selection, Sheet, SheetRefExt, Table};

fn print_sheet(sheet: &Sheet) {
    let (_, n_cols) = sheet.shape();
    let header: Vec<String> = (0..n_cols).map(|c| sheet.column_name(c)).collect();
    println!("    {}", header.join("\t"));
    for (i, row) in sheet.rows().enumerate() {
        let values: Vec<String> = row.iter().map(|v| v.as_text()).collect();
        println!("{:>3} {}", i + 1, values.join("\t"));
    }
}

fn main() {
    let sheet = Sheet::from_text_rows(
        "Demo",
        [
            ["Apple", "1.25", "TRUE"],
            ["Banana", "0.5", "FALSE"],
            ["Cherry", "4", "TRUE"],
            ["Durian", "12.75", "FALSE"],
        ],
    )
    .with_headers(["fruit", "price", "in_stock"]);

    println!("=== Full sheet ===");
    print_sheet(&sheet);

    for reference in ["A1", "A1:B3", "A", "A:B", "D1", "A1:B"] {
        println!("\n=== {} ===", reference);
        match sheet.excel().get(reference) {
            Ok(Selection::Scalar(value)) => println!("{}", value),
            Ok(Selection::Table(sub)) => print_sheet(&sub),
            Err(e) => println!("error: {}", e),
        }
    }
}
