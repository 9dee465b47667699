//! HTTP-level tests for the SOAP client against a mock server.

use charity_commission_client::{CharityCommissionClient, CharityCommissionError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASMX_PATH: &str = "/Showcharity/API/SearchCharitiesV1/SearchCharitiesV1.asmx";

fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>{body}</soap:Body>
</soap:Envelope>"#
    )
}

async fn client_for(server: &MockServer) -> CharityCommissionClient {
    CharityCommissionClient::new().with_endpoint(format!("{}{}", server.uri(), ASMX_PATH))
}

#[tokio::test]
async fn test_keyword_search_returns_charity_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ASMX_PATH))
        .and(header(
            "SOAPAction",
            "\"http://www.charitycommission.gov.uk/GetCharitiesByKeyword\"",
        ))
        .and(body_string_contains("<strSearch>madrassa</strSearch>"))
        .and(body_string_contains("<APIKey>test-key</APIKey>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<GetCharitiesByKeywordResponse xmlns="http://www.charitycommission.gov.uk/">
  <GetCharitiesByKeywordResult>
    <CharityList>
      <RegisteredCharityNumber>1125833</RegisteredCharityNumber>
      <SubsidiaryNumber>0</SubsidiaryNumber>
      <CharityName>GREEN LANE MASJID AND COMMUNITY CENTRE</CharityName>
    </CharityList>
    <CharityList>
      <RegisteredCharityNumber>1102307</RegisteredCharityNumber>
      <SubsidiaryNumber>0</SubsidiaryNumber>
      <CharityName>JAMIA MASJID &amp; MADRASSA FAIZ UL QURAN GHOUSIA</CharityName>
    </CharityList>
  </GetCharitiesByKeywordResult>
</GetCharitiesByKeywordResponse>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let hits = client
        .get_charities_by_keyword("test-key", "madrassa", &[])
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["RegisteredCharityNumber"], "1125833");
    assert_eq!(
        hits[1]["CharityName"],
        "JAMIA MASJID & MADRASSA FAIZ UL QURAN GHOUSIA"
    );
}

#[tokio::test]
async fn test_keyword_search_sends_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<RegisteredOnly>true</RegisteredOnly>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            "<GetCharitiesByKeywordResponse><GetCharitiesByKeywordResult/></GetCharitiesByKeywordResponse>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let hits = client
        .get_charities_by_keyword(
            "test-key",
            "nothing matches",
            &[("RegisteredOnly", "true")],
        )
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_nil_charity_list_is_no_hits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<GetCharitiesByKeywordResponse xmlns="http://www.charitycommission.gov.uk/">
  <GetCharitiesByKeywordResult>
    <CharityList xsi:nil="true"/>
  </GetCharitiesByKeywordResult>
</GetCharitiesByKeywordResponse>"#,
        )))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let hits = client
        .get_charities_by_keyword("test-key", "nothing matches", &[])
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_get_charity_by_number() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header(
            "SOAPAction",
            "\"http://www.charitycommission.gov.uk/GetCharityByRegisteredCharityNumber\"",
        ))
        .and(body_string_contains(
            "<registeredCharityNumber>1143183</registeredCharityNumber>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<GetCharityByRegisteredCharityNumberResponse xmlns="http://www.charitycommission.gov.uk/">
  <GetCharityByRegisteredCharityNumberResult>
    <RegisteredCharityNumber>1143183</RegisteredCharityNumber>
    <CharityName>JAMIAT AHL-E-HADITH OLDHAM</CharityName>
    <Returns>
      <AssetsAndLiabilities><Funds><TotalFunds>12345</TotalFunds></Funds></AssetsAndLiabilities>
    </Returns>
  </GetCharityByRegisteredCharityNumberResult>
</GetCharityByRegisteredCharityNumberResponse>"#,
        )))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let record = client
        .get_charity_by_registered_charity_number("test-key", 1143183)
        .await
        .unwrap();

    let result = &record["GetCharityByRegisteredCharityNumberResult"];
    assert_eq!(result["CharityName"], "JAMIAT AHL-E-HADITH OLDHAM");
    assert_eq!(
        result["Returns"][0]["AssetsAndLiabilities"]["Funds"]["TotalFunds"],
        "12345"
    );
}

#[tokio::test]
async fn test_soap_fault_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(envelope(
            "<soap:Fault><faultcode>soap:Client</faultcode><faultstring>Invalid APIKey</faultstring></soap:Fault>",
        )))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_charities_by_keyword("bad-key", "madrassa", &[])
        .await
        .unwrap_err();

    match err {
        CharityCommissionError::Fault { code, message } => {
            assert_eq!(code, "soap:Client");
            assert_eq!(message, "Invalid APIKey");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_soap_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .get_charity_by_registered_charity_number("test-key", 1)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CharityCommissionError::Api { status: 503, ref message } if message == "Service Unavailable"
    ));
}
