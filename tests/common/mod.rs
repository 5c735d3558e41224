#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Writes a single-sheet workbook; the first row is the header.
pub fn write_xlsx(dir: &Path, name: &str, rows: &[Vec<Cell>]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, c, *s).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

/// The products table used across tests.
pub const PRODUCTS_CSV: &str = "\
ID,NAME,PRICE,IN_STOCK,COMPRABLE,VENDIBLE
1,Product A,10.5,Y,S,S
2,Product B,20.0,N,S,
3,Product C,,Y,,S
4,Product D,15.75,, ,
5,Product E,8.25,None,S,S
";

pub fn sample_directory(dir: &Path) {
    write_csv(dir, "sample1.csv", "ID,NAME,STATUS\n1,Item A,Active\n2,Item B,\n3,Item C,Inactive\n");
    write_xlsx(
        dir,
        "sample2.xlsx",
        &[
            vec![Cell::Text("CODE"), Cell::Text("DESCRIPTION"), Cell::Text("QTY"), Cell::Text("COMPRABLE")],
            vec![Cell::Text("A001"), Cell::Text("Description 1"), Cell::Number(1.0), Cell::Text("S")],
            vec![Cell::Text("A002"), Cell::Text("Description 2"), Cell::Number(2.0), Cell::Blank],
            vec![Cell::Text("A003"), Cell::Blank, Cell::Blank, Cell::Text("S")],
        ],
    );
    std::fs::write(dir.join("sample3.txt"), "This is a text file that should be ignored.").unwrap();
}
