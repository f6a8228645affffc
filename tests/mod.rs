mod store_mock;

// Integration tests, grouped by concern:
// - smoke_tests: config defaults and the offline detections-to-calendar path
// - detection_mock: the parser against mocked detection services
// - store_mock: a mocked schedule store behind the storage trait
