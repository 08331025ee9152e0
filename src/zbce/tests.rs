use super::*;

#[test]
fn test_new_zbce_client() {
    let client =
        DefaultZbceClient::new("https://api.zbce.test/", "secret", Duration::from_secs(10));
    assert!(client.is_ok());
    assert_eq!(client.unwrap().base_url, "https://api.zbce.test");
}

#[test]
fn test_bin_list_deserialization_numeric_and_string_ids() {
    let body = r#"{ "data": [ { "id": 3 }, { "id": "patio-2" } ] }"#;
    let envelope: Envelope<BinInfo> = serde_json::from_str(body).unwrap();
    let ids: Vec<BinId> = envelope.data.into_iter().map(|b| b.id).collect();

    assert_eq!(ids, vec![BinId::Int(3), BinId::Text("patio-2".to_string())]);
}

#[test]
fn test_fullness_deserialization_ignores_extra_fields() {
    let body = r#"{
        "data": [
            { "bin_id": 3, "fullness": 41.5, "timestamp": "2021-02-21 08:00:00" },
            { "bin_id": 3, "fullness": 67.0, "timestamp": "2021-02-21 17:30:00" }
        ]
    }"#;

    let envelope: Envelope<FullnessReading> = serde_json::from_str(body).unwrap();
    assert_eq!(envelope.data.len(), 2);
    assert_eq!(envelope.data[1], FullnessReading { bin_id: BinId::Int(3), fullness: 67.0 });
}

#[test]
fn test_envelope_without_data_field_fails() {
    let body = r#"{ "bins": [] }"#;
    let envelope: Result<Envelope<BinInfo>> =
        serde_json::from_str(body).map_err(|e| ZbceError::MalformedResponse(e.to_string()));
    assert!(matches!(envelope, Err(ZbceError::MalformedResponse(_))));
}

#[test]
fn test_bin_id_display() {
    assert_eq!(BinId::Int(17).to_string(), "17");
    assert_eq!(BinId::Text("dock".to_string()).to_string(), "dock");
}
