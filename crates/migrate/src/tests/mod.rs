mod helpers;
mod scan_tests;
