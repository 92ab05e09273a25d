mod support;

mod scheduler_tests;
