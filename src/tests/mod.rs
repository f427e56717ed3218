mod aggregate_test;
mod property_test;
mod utils;
