pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod run;
pub mod scanner;
pub mod workbook;
