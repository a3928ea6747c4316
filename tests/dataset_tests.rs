//! Integration tests for dataset loading

use admission_sim::core::admission::{score_catalog, Verdict};
use admission_sim::core::catalog::CourseFilter;
use admission_sim::core::config::Config;
use admission_sim::core::dataset::load_dataset;
use admission_sim::core::models::CourseGroup;
use admission_sim::core::ranking::rank_with_weights;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DATASET: &str = r#"
[student]
course_group = "CIENCIAS"
grades = [
    { subject = "Matemática A", year = 10, grade = 17 },
    { subject = "Matemática A", year = 11, grade = 18 },
    { subject = "Português", year = 10, grade = 14 },
    { subject = "Português", year = 11, grade = 15 },
]
exams = [
    { code = "19", grade = 185 },
    { code = "07", grade = 160 },
]

[questionnaire]
interests = "programar e construir aplicações"
environment = "escritório com computadores"
subjects = "matemática e física"

[[courses]]
id = "ist-inf"
name = "Engenharia Informática e de Computadores"
institution = "Instituto Superior Técnico"
area = "Informática e Dados"
district = "Lisboa"
secondary_weight = 0.5
exam_weight = 0.5
minimum_threshold = 95
last_admitted_score = 178.0
requirements = [
    { exam_code = "19", weight = 0.5, alternative_group = 1 },
    { exam_code = "07", weight = 0.5, alternative_group = 1 },
]

[[courses]]
id = "ul-med"
name = "Medicina"
institution = "Universidade de Lisboa"
area = "Ciências da Vida e Saúde"
district = "Lisboa"
requirements = [
    { exam_code = "02", weight = 0.5, alternative_group = 1 },
    { exam_code = "07", weight = 0.5, alternative_group = 1 },
]

[[courses]]
id = "up-gest"
name = "Gestão"
institution = "Universidade do Porto"
area = "Economia, Gestão e Contabilidade"
district = "Porto"
type = "publica"
requirements = [{ exam_code = "19", weight = 1.0 }]
"#;

fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("aluno.toml");
    fs::write(&path, DATASET).expect("write dataset");
    path
}

#[test]
fn loads_student_and_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = load_dataset(write_dataset(&dir)).expect("dataset");

    assert_eq!(dataset.student.course_group, CourseGroup::Ciencias);
    assert_eq!(dataset.student.grades().len(), 4);
    assert_eq!(dataset.courses.len(), 3);
    // Matemática A 17.5 -> 18, Português 14.5 -> 15
    assert!((dataset.student.classification() - 16.5).abs() < 1e-9);
    assert!(dataset.query_text().starts_with("programar"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_dataset(dir.path().join("absent.toml")).expect_err("missing");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn dataset_feeds_scoring_and_filtering() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = load_dataset(write_dataset(&dir)).expect("dataset");
    let held: Vec<&str> = dataset.student.exam_codes().collect();

    let filter = CourseFilter {
        districts: vec!["Lisboa".to_string()],
        only_qualified: true,
        ..CourseFilter::default()
    };
    let selected = filter.apply(&dataset.courses, &held);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "ist-inf");

    let config = Config::default();
    let rows = score_catalog(
        &dataset.student.profile(),
        &dataset.courses,
        &config.scoring_policy(),
    );
    assert_eq!(rows[1].standing.verdict, Verdict::MissingExams);
    assert!(rows[0].result.has_required_exams);
    assert!(rows[2].result.meets_minimum);
}

#[test]
fn dataset_feeds_ranking() {
    let dir = TempDir::new().expect("tempdir");
    let dataset = load_dataset(write_dataset(&dir)).expect("dataset");

    let ranked = rank_with_weights(
        &dataset.query_text(),
        &dataset.courses,
        None,
        &Config::default().ranking_weights(),
    );
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].id, "ist-inf");
}

#[test]
fn bundled_sample_loads_and_ranks_with_profile() {
    use admission_sim::core::catalog::AREAS;
    use admission_sim::core::recommendation::{FileProfileSource, RecommendationSource};

    let samples = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
    let dataset = load_dataset(samples.join("dataset.toml")).expect("sample dataset");
    let answers = dataset.questionnaire.clone().expect("questionnaire");

    let profile = FileProfileSource::new(samples.join("profile.json"))
        .recommend(&answers, AREAS)
        .expect("sample profile");
    assert_eq!(profile.area_weights.len(), 4);

    let ranked = rank_with_weights(
        &dataset.query_text(),
        &dataset.courses,
        Some(&profile),
        &Config::default().ranking_weights(),
    );
    assert_eq!(ranked[0].id, "ist-leic");
}
