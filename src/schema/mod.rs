pub mod artifact;
pub mod classification;
pub mod language;
pub mod value;
pub mod workbook;
