use serde::Deserialize;

use wmigen_core::ManufacturerRecord;

use crate::normalize::title_case;

/// Response envelope of the NHTSA `GetWMIsForManufacturer` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WmiResponse {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub message: String,
    pub results: Vec<WmiEntry>,
}

/// One manufacturer row of the payload. The API serves plenty of junk:
/// null countries, null names, WMIs of the wrong length.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WmiEntry {
    #[serde(default, rename = "WMI")]
    pub wmi: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WmiEntry {
    /// Flatten the optional fields into a record; missing values become
    /// empty strings, which the compiler drops with a diagnostic.
    pub fn into_record(self) -> ManufacturerRecord {
        ManufacturerRecord {
            wmi: self.wmi.unwrap_or_default(),
            country: self
                .country
                .map(|value| title_case(&value))
                .unwrap_or_default(),
            manufacturer: self.name.map(|value| title_case(&value)).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_decodes_with_junk_rows() {
        let payload = r#"{
            "Count": 2,
            "Message": "Results returned successfully",
            "SearchCriteria": null,
            "Results": [
                {"Country": "UNITED STATES (USA)", "Id": 987, "Name": "MOTOR COACH INDUSTRIES, INC.", "VehicleType": "Bus", "WMI": "1M8"},
                {"Country": null, "Id": 988, "Name": null, "VehicleType": "Bus", "WMI": "XX"}
            ]
        }"#;

        let response: WmiResponse = serde_json::from_str(payload).expect("payload decodes");
        assert_eq!(response.count, 2);
        assert_eq!(response.results.len(), 2);

        let good = response.results[0].clone().into_record();
        assert_eq!(good.wmi, "1M8");
        assert_eq!(good.country, "United States (Usa)");
        assert_eq!(good.manufacturer, "Motor Coach Industries, Inc.");

        let junk = response.results[1].clone().into_record();
        assert_eq!(junk.wmi, "XX");
        assert_eq!(junk.country, "");
        assert_eq!(junk.manufacturer, "");
    }
}
