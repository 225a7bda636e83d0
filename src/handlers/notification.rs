pub mod test_noti;
