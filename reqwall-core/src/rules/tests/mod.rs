mod rule_tests;
