pub mod common;

pub mod a001_referrer;
pub mod a002_staff;
pub mod a003_lab_test;
pub mod a004_test_category;
pub mod a005_global_test;
