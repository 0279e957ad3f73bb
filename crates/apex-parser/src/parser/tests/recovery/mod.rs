mod fuel_tests;
mod listener_tests;
mod unclosed_tests;
mod unexpected_tests;
