//! Integration tests for course ranking and recommendation profiles

use admission_sim::core::catalog::AREAS;
use admission_sim::core::models::Course;
use admission_sim::core::ranking::{rank, rank_with_weights, RankingWeights};
use admission_sim::core::recommendation::{
    collect_stream_tokens, AiProfile, FileProfileSource, QuestionnaireAnswers,
    RecommendationSource,
};
use std::fs;
use tempfile::TempDir;

fn catalog() -> Vec<Course> {
    vec![
        Course::new("inf", "Engenharia Informática", "Informática e Dados"),
        Course::new("bio", "Biologia", "Ciências"),
        Course::new("dir", "Direito", "Humanas"),
        Course::new("des", "Design de Comunicação", "Artes e Design"),
    ]
}

fn ids(ranked: &[admission_sim::core::ranking::RankedCourse]) -> Vec<&str> {
    ranked.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn biology_answer_ranks_biology_first() {
    let courses = vec![
        Course::new("bio", "Biologia", "Ciências"),
        Course::new("dir", "Direito", "Humanas"),
    ];
    let ranked = rank("gosto de resolver problemas e biologia", &courses, None);
    assert_eq!(ranked[0].id, "bio");
}

#[test]
fn every_course_is_scored_and_sorted() {
    let ranked = rank("quero programar e analisar dados", &catalog(), None);
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].id, "inf");
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn ranking_is_deterministic() {
    let query = "design gráfico e comunicação visual";
    let first = rank(query, &catalog(), None);
    for _ in 0..10 {
        assert_eq!(rank(query, &catalog(), None), first);
    }
}

#[test]
fn empty_profile_matches_no_profile() {
    let query = "direito e justiça";
    let plain = rank(query, &catalog(), None);
    let empty = rank(query, &catalog(), Some(&AiProfile::default()));
    assert_eq!(plain, empty);
}

#[test]
fn ties_keep_catalog_order() {
    let ranked = rank("astronomia", &catalog(), None);
    assert_eq!(ids(&ranked), vec!["inf", "bio", "dir", "des"]);
}

#[test]
fn area_weights_reorder_unrelated_query() {
    let profile: AiProfile =
        serde_json::from_str(r#"{"areaWeights":{"Artes e Design":0.9,"Humanas":0.2}}"#)
            .expect("profile");
    let ranked = rank("", &catalog(), Some(&profile));
    assert_eq!(ids(&ranked)[..2], ["des", "dir"]);
}

#[test]
fn zero_blend_ignores_area_weights() {
    let profile: AiProfile =
        serde_json::from_str(r#"{"areaWeights":{"Humanas":1.0}}"#).expect("profile");
    let weights = RankingWeights {
        area_blend: 0.0,
        ..RankingWeights::default()
    };
    let ranked = rank_with_weights("biologia", &catalog(), Some(&profile), &weights);
    assert_eq!(ranked[0].id, "bio");
    let plain = rank("biologia", &catalog(), None);
    assert!((ranked[0].score - plain[0].score).abs() < 1e-12);
}

#[test]
fn file_source_reads_stream_capture() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("reply.ndjson");
    fs::write(
        &path,
        concat!(
            "{\"type\":\"token\",\"content\":\"Perfil: {\\\"areaWeights\\\":{\\\"Informática e Dados\\\":0.8,\"}\n",
            "{\"type\":\"token\",\"content\":\"\\\"Planetas\\\":0.5},\\\"keywords\\\":[\\\"dados\\\"]}\"}\n",
            "{\"type\":\"done\"}\n",
        ),
    )
    .expect("write");

    let profile = FileProfileSource::new(&path)
        .recommend(&QuestionnaireAnswers::default(), AREAS)
        .expect("profile");

    assert!((profile.area_weight("Informática e Dados") - 0.8).abs() < f64::EPSILON);
    // areas outside the closed list are dropped
    assert!(profile.area_weights.get("Planetas").is_none());
    assert_eq!(profile.keywords, vec!["dados"]);
}

#[test]
fn file_source_tolerates_missing_or_garbled_files() {
    let dir = TempDir::new().expect("tempdir");
    let answers = QuestionnaireAnswers::default();

    let missing = FileProfileSource::new(dir.path().join("absent.json"));
    assert!(missing.recommend(&answers, AREAS).is_none());

    let garbled_path = dir.path().join("garbled.json");
    fs::write(&garbled_path, "o serviço está indisponível").expect("write");
    let garbled = FileProfileSource::new(&garbled_path);
    assert!(garbled.recommend(&answers, AREAS).is_none());
}

#[test]
fn stream_without_done_keeps_all_tokens() {
    let text = collect_stream_tokens(
        "{\"type\":\"token\",\"content\":\"a\"}\n{\"type\":\"token\",\"content\":\"b\"}",
    );
    assert_eq!(text, "ab");
}

#[test]
fn questionnaire_drives_ranking() {
    let answers = QuestionnaireAnswers {
        interests: "Programar jogos".to_string(),
        subjects: "Matemática e informática".to_string(),
        ..QuestionnaireAnswers::default()
    };
    let ranked = rank(&answers.combined_text(), &catalog(), None);
    assert_eq!(ranked[0].id, "inf");
}
