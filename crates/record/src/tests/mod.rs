mod format_tests;

pub(crate) use crate::testing::make_record;
