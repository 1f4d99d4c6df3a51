mod generate_tests;
mod script_tests;
