pub mod mock_uplink;
