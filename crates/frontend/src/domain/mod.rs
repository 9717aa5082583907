pub mod a001_referrer;
pub mod a002_staff;
pub mod a003_lab_test;
