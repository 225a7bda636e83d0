pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;

// the maintenance scan runs once per day at this local hour
pub const MAINTENANCE_JOB_RUN_HOUR: u32 = 7;

// average daily usage projection:
// (hours per active day * active days per week) / (days per week)
pub const USAGE_HOURS_PER_ACTIVE_DAY: f64 = 6.5;
pub const USAGE_ACTIVE_DAYS_PER_WEEK: f64 = 6.0;
pub const USAGE_DAYS_PER_WEEK: f64 = 7.0;

pub const MAINTENANCE_PUSH_TITLE: &str = "Upcoming Maintenance Reminder";
pub const MAINTENANCE_MSG_TEMPLATE: &str =
    r#"Maintenance for "{{maintenanceType}}" on "{{equipmentName}}" is due today."#;
pub const TEST_PUSH_TITLE: &str = "Test Notification";
pub const TEST_PUSH_BODY: &str = "This is a test notification from the app settings!";

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const FIREBASE_MESSAGE_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const FCM_ENDPOINT: &str = "https://fcm.googleapis.com/v1/projects/equipcare-app/messages:send";

pub const DB_NAME: &str = "equipcare";

pub const COLL_USERS: &str = "users";
pub const COLL_EQUIPMENT: &str = "equipment";
pub const COLL_MAINTENANCE_RECORDS: &str = "maintenanceRecords";
