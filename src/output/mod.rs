pub mod report;

pub use report::ReportFormatter;
