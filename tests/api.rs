use career_recommender::core::Table;
use career_recommender::environment::ServerSettings;
use career_recommender::recommendation::MarketData;
use career_recommender::training::{SkillDataset, Trainer};
use career_recommender::web::build_rocket;
use career_recommender::{Recommender, TrainingConfig};
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::Value;

const TRAINING: &str = "job title,skills\n\
    Data Scientist,\"python, machine learning, statistics\"\n\
    Data Scientist,\"python, machine learning, sql\"\n\
    Data Scientist,\"deep learning, python\"\n\
    Data Analyst,\"excel, tableau, reporting\"\n\
    Data Analyst,\"excel, reporting\"\n\
    Data Analyst,\"tableau, dashboards\"\n\
    Web Developer,\"html, css, javascript\"\n\
    Web Developer,\"javascript, react\"\n\
    Web Developer,\"css, react\"\n\
    Web Developer,\"html, javascript\"\n";

fn client(market_csv: &str) -> Client {
    let table = Table::from_reader(TRAINING.as_bytes()).unwrap();
    let dataset = SkillDataset::from_table(table).unwrap();
    let config = TrainingConfig {
        n_trees: 30,
        ..TrainingConfig::default()
    };
    let (artifacts, _) = Trainer::fit(&dataset, &config).unwrap();
    let market = MarketData::from_table(Table::from_reader(market_csv.as_bytes()).unwrap());

    let rocket = build_rocket(Recommender::new(artifacts, market), &ServerSettings::default());
    Client::tracked(rocket).expect("valid rocket instance")
}

const MARKET: &str = "Job Id,Job Title,Salary Range,Demand Level\n\
    0,Data Analyst,$60k-$85k,Medium\n\
    1,Data Scientist,$90k-$130k,High\n\
    2,Web Developer,$70k-$110k,High\n";

#[test]
fn test_recommend_endpoint() {
    let client = client(MARKET);
    let response = client
        .post("/api/recommend")
        .header(ContentType::JSON)
        .body(r#"{"skills": "html, css, javascript", "conversation_id": "abc"}"#)
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "data");
    assert_eq!(body["conversation_id"], "abc");
    assert_eq!(body["data"]["job_title"], "Web Developer");
    assert_eq!(body["data"]["avg_salary"], "$70k-$110k");
    assert!(body["data"]["confidence"].as_str().unwrap().parse::<f64>().is_ok());
}

#[test]
fn test_empty_skills_is_bad_request() {
    let client = client(MARKET);
    let response = client
        .post("/api/recommend")
        .header(ContentType::JSON)
        .body(r#"{"skills": "  ,  "}"#)
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "NO_SKILLS");
    assert_eq!(body["error"], "No skills provided.");
}

#[test]
fn test_no_matching_job_is_not_found() {
    let client = client("Job Id,Job Title\n42,Astronaut\n");
    let response = client
        .post("/api/recommend")
        .header(ContentType::JSON)
        .body(r#"{"skills": "python"}"#)
        .dispatch();

    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["error_code"], "NO_MATCHING_JOB");
}

#[test]
fn test_market_without_required_columns_is_unavailable() {
    let client = client("Title,Salary Range\nData Scientist,$1\n");
    let response = client
        .post("/api/recommend")
        .header(ContentType::JSON)
        .body(r#"{"skills": "python"}"#)
        .dispatch();

    assert_eq!(response.status(), Status::ServiceUnavailable);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["error_code"], "MARKET_DATA_COLUMNS_MISSING");
}

#[test]
fn test_malformed_body_hits_catcher() {
    let client = client(MARKET);
    let response = client
        .post("/api/recommend")
        .header(ContentType::JSON)
        .body(r#"{"skill": 3}"#)
        .dispatch();

    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["error_code"], "UNPROCESSABLE_ENTITY");
}

#[test]
fn test_health_reports_model_shape() {
    let client = client(MARKET);
    let response = client.get("/api/health").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["data"]["job_titles"], 3);
    assert_eq!(body["data"]["trees"], 30);
    assert_eq!(body["data"]["market_rows"], 3);
}
