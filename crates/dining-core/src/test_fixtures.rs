use crate::types::{Address, Location, StatusInfo};

pub(crate) fn location(id: &str, label: &str, color: &str) -> Location {
    Location {
        id: id.to_string(),
        name: format!("Venue {id}"),
        is_open: color == "green",
        status: StatusInfo {
            label: label.to_string(),
            message: format!("{label} message"),
            color_name: color.to_string(),
        },
        occupancy: String::new(),
        address: Address {
            street: String::new(),
            metadata: None,
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            lat: 0.0,
            lon: 0.0,
            phone: None,
            dst_flag: false,
            gmt: 0.0,
            phone_formatted: None,
            gmt_offset: 0.0,
            coordinates: vec![],
            manual_coordinates: vec![],
        },
    }
}
