mod relay_tests;
