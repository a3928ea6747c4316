//! Course catalog filtering and reference tables

use crate::core::models::{Course, CourseGroup, InstitutionType};

/// Closed list of course areas a profile can weight
pub const AREAS: &[&str] = &[
    "Artes e Design",
    "Ciências da Vida e Saúde",
    "Ciências Exatas e da Natureza",
    "Direito, Ciências Sociais e Humanas",
    "Economia, Gestão e Contabilidade",
    "Educação e Desporto",
    "Engenharia e Tecnologia",
    "Informática e Dados",
];

/// National exam codes and subject names
pub const EXAM_SUBJECTS: &[(&str, &str)] = &[
    ("01", "Alemão"),
    ("02", "Biologia e Geologia"),
    ("03", "Desenho A"),
    ("04", "Grego"),
    ("05", "Espanhol"),
    ("06", "Filosofia"),
    ("07", "Física e Química A"),
    ("08", "Francês"),
    ("09", "Geografia"),
    ("10", "Geometria Descritiva A"),
    ("11", "História A"),
    ("12", "Hist. da Cultura e das Artes"),
    ("13", "Inglês"),
    ("14", "Latim"),
    ("15", "Literatura Portuguesa"),
    ("16", "Matemática"),
    ("17", "MACS"),
    ("18", "Português"),
    ("19", "Matemática A"),
    ("20", "Italiano"),
    ("21", "Mandarim"),
];

/// Subject name for an exam code
#[must_use]
pub fn exam_name(code: &str) -> Option<&'static str> {
    EXAM_SUBJECTS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Subjects common to every general-track course group (10th and 11th year)
pub const GENERAL_SUBJECTS: &[&str] = &["Português", "Filosofia", "Inglês", "Educação Física"];

/// General subjects still taken in the 12th year
const YEAR_12_GENERAL: &[&str] = &["Português", "Educação Física"];

/// Specific subjects of a course group by duration
struct GroupSubjects {
    three_year: &'static [&'static str],
    two_year: &'static [&'static str],
    year_12: &'static [&'static str],
}

const fn group_subjects(group: CourseGroup) -> Option<GroupSubjects> {
    match group {
        CourseGroup::Ciencias => Some(GroupSubjects {
            three_year: &["Matemática A"],
            two_year: &["Física e Química A", "Biologia e Geologia", "Geometria Descritiva A"],
            year_12: &[
                "Biologia",
                "Física",
                "Química",
                "Geologia",
                "Antropologia",
                "Aplicações Informáticas B",
                "Ciência Política",
                "Clássicos da Literatura",
                "Direito",
                "Economia C",
                "Filosofia A",
                "Psicologia B",
                "Sociologia",
            ],
        }),
        CourseGroup::Economia => Some(GroupSubjects {
            three_year: &["Matemática A"],
            two_year: &["Economia A", "Geografia A", "História da Cultura e das Artes"],
            year_12: &["Economia C", "Sociologia", "Psicologia B", "Direito", "Geografia C"],
        }),
        CourseGroup::Humanidades => Some(GroupSubjects {
            three_year: &["História A"],
            two_year: &[
                "Geografia A",
                "Latim A",
                "Literatura Portuguesa",
                "Matemática Aplicada às Ciências Sociais (MACS)",
                "Língua Estrangeira II ou III",
            ],
            year_12: &[
                "Filosofia A",
                "Psicologia B",
                "Sociologia",
                "Direito",
                "Economia C",
                "Clássicos da Literatura",
            ],
        }),
        CourseGroup::Artes => Some(GroupSubjects {
            three_year: &["Desenho A"],
            two_year: &["Geometria Descritiva A", "Matemática B", "História da Cultura e das Artes"],
            year_12: &["Oficina de Artes", "Oficina de Multimédia B", "Materiais e Tecnologias"],
        }),
        CourseGroup::Profissional => None,
    }
}

/// Subjects a student of `group` takes in school year `year` (10, 11 or 12).
///
/// The professional track and unknown years have no fixed subject list.
#[must_use]
pub fn subjects_for_year(year: u8, group: CourseGroup) -> Vec<&'static str> {
    let Some(subjects) = group_subjects(group) else {
        return Vec::new();
    };

    match year {
        10 | 11 => GENERAL_SUBJECTS
            .iter()
            .chain(subjects.three_year)
            .chain(subjects.two_year)
            .copied()
            .collect(),
        12 => YEAR_12_GENERAL
            .iter()
            .chain(subjects.three_year)
            .chain(subjects.year_12)
            .copied()
            .collect(),
        _ => Vec::new(),
    }
}

/// Catalog filter; empty criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Case-insensitive substring of the course name or institution
    pub search: Option<String>,
    /// Allowed areas
    pub areas: Vec<String>,
    /// Allowed districts
    pub districts: Vec<String>,
    /// Required institution type
    pub institution_type: Option<InstitutionType>,
    /// Keep courses requiring at least one of these exam codes
    pub exam_codes: Vec<String>,
    /// Keep only courses whose every required exam the student holds
    pub only_qualified: bool,
}

impl CourseFilter {
    /// Whether the filter would keep every course
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(str::is_empty)
            && self.areas.is_empty()
            && self.districts.is_empty()
            && self.institution_type.is_none()
            && self.exam_codes.is_empty()
            && !self.only_qualified
    }

    /// Whether one course passes, given the exam codes the student holds
    #[must_use]
    pub fn matches(&self, course: &Course, held_exam_codes: &[&str]) -> bool {
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            if !course.name.to_lowercase().contains(&query)
                && !course.institution.to_lowercase().contains(&query)
            {
                return false;
            }
        }
        if !self.areas.is_empty() && !self.areas.contains(&course.area) {
            return false;
        }
        if !self.districts.is_empty() && !self.districts.contains(&course.district) {
            return false;
        }
        if self
            .institution_type
            .is_some_and(|kind| kind != course.institution_type)
        {
            return false;
        }

        let codes = course.exam_codes();
        if !self.exam_codes.is_empty()
            && !self.exam_codes.iter().any(|c| codes.contains(&c.as_str()))
        {
            return false;
        }
        if self.only_qualified && !codes.iter().all(|c| held_exam_codes.contains(c)) {
            return false;
        }
        true
    }

    /// Courses passing the filter, in catalog order
    #[must_use]
    pub fn apply<'a>(&self, courses: &'a [Course], held_exam_codes: &[&str]) -> Vec<&'a Course> {
        courses
            .iter()
            .filter(|course| self.matches(course, held_exam_codes))
            .collect()
    }
}
