use career_recommender::training::{Evaluator, Preprocessor, Trainer};
use career_recommender::{
    recommend, ArtifactPaths, RecommendError, RecommendOutcome, Recommender, TrainingConfig,
};
use std::fs;
use std::path::Path;

const RAW: &str = "\
Job Id, Job Title ,Skills,Job Posting Date,Company
1,Data Scientist,\"Python, Machine Learning, Statistics\",2023-03-01,Acme
2,Data Scientist,\"python, machine learning, sql\",2023-03-02,Acme
3,Data Scientist,\"deep learning, python\",2023/03/03,Acme
4,Data Scientist,\"machine learning, statistics\",03/04/2023,Acme
5,Data Scientist,\"python, statistics, sql\",garbage,Acme
6,Data Analyst,\"excel, tableau, reporting\",2023-03-01,Initech
7,Data Analyst,\"excel, reporting\",2023-03-01,Initech
8,Data Analyst,\"tableau, dashboards\",2023-03-01,Initech
9,Data Analyst,\"excel, dashboards, reporting\",2023-03-01,Initech
10,Data Analyst,\"tableau, excel\",2023-03-01,Initech
11,Web Developer,\"html, css, javascript\",2023-03-01,Globex
12,Web Developer,\"javascript, react\",2023-03-01,Globex
13,Web Developer,\"css, react\",2023-03-01,Globex
14,Web Developer,\"html, javascript\",2023-03-01,Globex
15,Web Developer,\"react, html\",2023-03-01,Globex
15,Web Developer,\"react, html\",2023-03-01,Globex
16,,\"python\",2023-03-01,Nobody
";

const MARKET: &str = "\
Job Id,Job Title,Salary Range,Demand Level,Company,location
0,Data Analyst,$60k-$85k,Medium,Initech,Austin
1,Data Scientist,$90k-$130k,High,Acme,Remote
2,Web Developer,$70k-$110k,High,Globex,Berlin
";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn trained_workspace(dir: &Path) -> ArtifactPaths {
    let paths = ArtifactPaths::rooted_at(dir);
    write(&paths.raw_data, RAW);
    write(&paths.market_data, MARKET);

    let config = TrainingConfig {
        n_trees: 50,
        ..TrainingConfig::default()
    };
    let preprocess = Preprocessor::new(&paths).run().unwrap();
    assert_eq!(preprocess.rows_written, 15);
    assert_eq!(preprocess.dropped_duplicates, 1);
    assert_eq!(preprocess.dropped_missing, 1);
    assert_eq!(preprocess.dates_nulled, 1);

    let training = Trainer::new(paths.clone(), config).run().unwrap();
    assert_eq!(training.classes, 3);
    assert_eq!(training.test_rows, 3);

    paths
}

#[test]
fn test_full_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());

    let result = recommend(&paths, "python, machine learning, sql").unwrap();
    assert_eq!(result.job_title, "Data Scientist");
    assert!(result.confidence > 0.0 && result.confidence <= 100.0);
    assert_eq!(result.avg_salary, "$90k-$130k");
    assert_eq!(result.demand_level, "High");
    assert_eq!(result.market_insights, "Company: Acme\nlocation: Remote");

    let config = TrainingConfig {
        n_trees: 50,
        ..TrainingConfig::default()
    };
    let report = Evaluator::new(paths.clone(), config).run().unwrap();
    assert_eq!(report.total, 3);
    assert!((0.0..=1.0).contains(&report.accuracy));
}

#[test]
fn test_recommendations_are_stable_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());

    let first = Recommender::load(&paths).unwrap();
    let second = Recommender::load(&paths).unwrap();
    for skills in ["html, css", "excel", "statistics, python", "quantum knitting"] {
        assert_eq!(first.recommend(skills), second.recommend(skills));
        let confidence = first.recommend(skills).unwrap().confidence;
        assert!((0.0..=100.0).contains(&confidence));
    }
}

#[test]
fn test_retraining_with_same_seed_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());
    let before = fs::read(paths.model_path()).unwrap();

    Trainer::new(
        paths.clone(),
        TrainingConfig {
            n_trees: 50,
            ..TrainingConfig::default()
        },
    )
    .run()
    .unwrap();

    assert_eq!(fs::read(paths.model_path()).unwrap(), before);
}

#[test]
fn test_empty_input_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());

    assert_eq!(recommend(&paths, ""), Err(RecommendError::NoSkills));
    assert_eq!(recommend(&paths, "   "), Err(RecommendError::NoSkills));

    fs::remove_file(&paths.market_data).unwrap();
    assert!(matches!(
        recommend(&paths, "python"),
        Err(RecommendError::MarketDataNotFound(_))
    ));

    fs::remove_file(paths.vectorizer_path()).unwrap();
    let err = recommend(&paths, "python").unwrap_err();
    assert!(matches!(err, RecommendError::ModelNotFound(_)));
}

#[test]
fn test_missing_artifacts_come_back_as_error_payload() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());
    fs::remove_file(paths.vectorizer_path()).unwrap();

    let outcome = RecommendOutcome::from(recommend(&paths, "python"));
    assert_eq!(
        serde_json::to_value(outcome).unwrap(),
        serde_json::json!({
            "error": "Model files not found! \
                      Please train the model first using the `train` command."
        })
    );

    fs::remove_file(&paths.market_data).unwrap();
    let outcome = RecommendOutcome::from(recommend(&paths, ""));
    assert!(matches!(outcome, RecommendOutcome::Error { .. }));
}

#[test]
fn test_market_without_id_column() {
    let dir = tempfile::tempdir().unwrap();
    let paths = trained_workspace(dir.path());
    write(&paths.market_data, "Job Title,Salary Range\nData Scientist,$1\n");

    assert_eq!(
        recommend(&paths, "python, sql"),
        Err(RecommendError::MissingColumns)
    );
}
