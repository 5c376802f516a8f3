mod mock_tests;
mod record_tests;
