//! Sample data loaded into a fresh store

use crate::entities::{Company, Employee};
use uuid::Uuid;

pub const PBX_DIGITAL_ID: Uuid = Uuid::from_u128(0xc9d4c053_49b6_410c_bc78_2d54a9991870);
pub const PRO_HOME_SERVICES_ID: Uuid = Uuid::from_u128(0x3d490a70_94ce_4d15_9494_5248280c2ce3);
pub const MANPREET_ID: Uuid = Uuid::from_u128(0x80abbca8_664d_4b20_b5de_024705497d4a);
pub const JOHN_ID: Uuid = Uuid::from_u128(0x86dba8c0_d178_41e7_938c_ed49778fb52a);

pub fn companies() -> Vec<Company> {
    vec![
        Company::with_id(
            PBX_DIGITAL_ID,
            "PBX Digital Ltd.".to_string(),
            "Papakura, Auckland, NZ".to_string(),
            "New Zealand".to_string(),
        ),
        Company::with_id(
            PRO_HOME_SERVICES_ID,
            "Pro Home Services Ltd.".to_string(),
            "Papakura, Auckland, NZ".to_string(),
            "New Zealand".to_string(),
        ),
    ]
}

pub fn employees() -> Vec<Employee> {
    vec![
        Employee::with_id(
            MANPREET_ID,
            "Manpreet".to_string(),
            29,
            "Software developer".to_string(),
            PBX_DIGITAL_ID,
        ),
        Employee::with_id(
            JOHN_ID,
            "John".to_string(),
            35,
            "Pest controller".to_string(),
            PRO_HOME_SERVICES_ID,
        ),
    ]
}
