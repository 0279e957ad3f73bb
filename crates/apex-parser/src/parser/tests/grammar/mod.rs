mod declarations_tests;
mod expressions_tests;
mod literals_tests;
mod soql_tests;
mod sosl_tests;
mod statements_tests;
mod triggers_tests;
