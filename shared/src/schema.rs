//! 四种实体的描述符与 [`Entity`] 实现

use crate::directory::GradeDirectory;
use crate::entity::{
    Entity, EntitySchema, FieldKind, FieldSpec, FormReader, FormValues, GENDER_CHOICES,
};
use crate::error::ValidationError;
use crate::{
    EntityId, Grade, GradeDraft, GradeRef, PersonDraft, Student, Subject, SubjectDraft, Teacher,
};

const PERSON_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("first_name", "First Name", FieldKind::Text),
    FieldSpec::required("last_name", "Last Name", FieldKind::Text),
    FieldSpec::required("age", "Age", FieldKind::Number),
    FieldSpec::required("gender", "Gender", FieldKind::Choice(GENDER_CHOICES)),
    FieldSpec::required("grade", "Grade", FieldKind::GradeSelect),
];

const PERSON_COLUMNS: &[&str] = &["First Name", "Last Name", "Age", "Gender", "Grade"];

pub static TEACHER_SCHEMA: EntitySchema = EntitySchema {
    collection: "teacher",
    singular: "Teacher",
    plural: "Teachers",
    fields: PERSON_FIELDS,
    columns: PERSON_COLUMNS,
    needs_grades: true,
};

pub static STUDENT_SCHEMA: EntitySchema = EntitySchema {
    collection: "students",
    singular: "Student",
    plural: "Students",
    fields: PERSON_FIELDS,
    columns: PERSON_COLUMNS,
    needs_grades: true,
};

pub static GRADE_SCHEMA: EntitySchema = EntitySchema {
    collection: "grade",
    singular: "Class",
    plural: "Classes",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("level", "Level", FieldKind::Text),
    ],
    columns: &["Name", "Level"],
    needs_grades: false,
};

pub static SUBJECT_SCHEMA: EntitySchema = EntitySchema {
    collection: "subjects",
    singular: "Subject",
    plural: "Subjects",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("grade", "Grade", FieldKind::GradeSelect),
    ],
    columns: &["Name", "Grade"],
    needs_grades: true,
};

// =========================================================
// 教师 / 学生共用的辅助函数
// =========================================================

fn person_form(
    first_name: &str,
    last_name: &str,
    age: u32,
    gender: crate::Gender,
    grade: Option<&GradeRef>,
    grades: &GradeDirectory,
) -> FormValues {
    FormValues::new()
        .with("first_name", first_name)
        .with("last_name", last_name)
        .with("age", age.to_string())
        .with("gender", gender.as_str())
        .with("grade", grades.form_value(grade))
}

fn parse_person(
    schema: &'static EntitySchema,
    form: &FormValues,
    grades: &GradeDirectory,
) -> Result<PersonDraft, ValidationError> {
    let mut reader = FormReader::new(schema, form);
    let first_name = reader.text("first_name");
    let last_name = reader.text("last_name");
    let age = reader.number("age");
    let gender = reader.gender("gender");
    let grade = reader.grade("grade", grades);

    match (first_name, last_name, age, gender, grade) {
        (Some(first_name), Some(last_name), Some(age), Some(gender), Some(grade)) => {
            Ok(PersonDraft {
                first_name,
                last_name,
                age,
                gender,
                grade,
            })
        }
        _ => Err(reader.into_error()),
    }
}

fn person_cells(
    first_name: &str,
    last_name: &str,
    age: u32,
    gender: crate::Gender,
    grade: Option<&GradeRef>,
    grades: &GradeDirectory,
) -> Vec<String> {
    vec![
        first_name.to_string(),
        last_name.to_string(),
        age.to_string(),
        gender.as_str().to_string(),
        grades.display(grade),
    ]
}

// =========================================================
// Entity 实现
// =========================================================

impl Entity for Teacher {
    type Draft = PersonDraft;

    fn schema() -> &'static EntitySchema {
        &TEACHER_SCHEMA
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: PersonDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            age: draft.age,
            gender: draft.gender,
            grade: Some(GradeRef::Id(draft.grade)),
        }
    }

    fn to_form(&self, grades: &GradeDirectory) -> FormValues {
        person_form(
            &self.first_name,
            &self.last_name,
            self.age,
            self.gender,
            self.grade.as_ref(),
            grades,
        )
    }

    fn parse_form(
        form: &FormValues,
        grades: &GradeDirectory,
    ) -> Result<PersonDraft, ValidationError> {
        parse_person(&TEACHER_SCHEMA, form, grades)
    }

    fn cells(&self, grades: &GradeDirectory) -> Vec<String> {
        person_cells(
            &self.first_name,
            &self.last_name,
            self.age,
            self.gender,
            self.grade.as_ref(),
            grades,
        )
    }
}

impl Entity for Student {
    type Draft = PersonDraft;

    fn schema() -> &'static EntitySchema {
        &STUDENT_SCHEMA
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: PersonDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            age: draft.age,
            gender: draft.gender,
            grade: Some(GradeRef::Id(draft.grade)),
        }
    }

    fn to_form(&self, grades: &GradeDirectory) -> FormValues {
        person_form(
            &self.first_name,
            &self.last_name,
            self.age,
            self.gender,
            self.grade.as_ref(),
            grades,
        )
    }

    fn parse_form(
        form: &FormValues,
        grades: &GradeDirectory,
    ) -> Result<PersonDraft, ValidationError> {
        parse_person(&STUDENT_SCHEMA, form, grades)
    }

    fn cells(&self, grades: &GradeDirectory) -> Vec<String> {
        person_cells(
            &self.first_name,
            &self.last_name,
            self.age,
            self.gender,
            self.grade.as_ref(),
            grades,
        )
    }
}

impl Entity for Grade {
    type Draft = GradeDraft;

    fn schema() -> &'static EntitySchema {
        &GRADE_SCHEMA
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: GradeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            level: draft.level,
        }
    }

    fn to_form(&self, _grades: &GradeDirectory) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("level", self.level.as_str())
    }

    fn parse_form(
        form: &FormValues,
        _grades: &GradeDirectory,
    ) -> Result<GradeDraft, ValidationError> {
        let mut reader = FormReader::new(&GRADE_SCHEMA, form);
        let name = reader.text("name");
        let level = reader.text("level");
        match (name, level) {
            (Some(name), Some(level)) => Ok(GradeDraft { name, level }),
            _ => Err(reader.into_error()),
        }
    }

    fn cells(&self, _grades: &GradeDirectory) -> Vec<String> {
        vec![self.name.clone(), self.level.clone()]
    }
}

impl Entity for Subject {
    type Draft = SubjectDraft;

    fn schema() -> &'static EntitySchema {
        &SUBJECT_SCHEMA
    }

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: SubjectDraft) -> Self {
        Self {
            id,
            name: draft.name,
            grade: Some(GradeRef::Id(draft.grade)),
        }
    }

    fn to_form(&self, grades: &GradeDirectory) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("grade", grades.form_value(self.grade.as_ref()))
    }

    fn parse_form(
        form: &FormValues,
        grades: &GradeDirectory,
    ) -> Result<SubjectDraft, ValidationError> {
        let mut reader = FormReader::new(&SUBJECT_SCHEMA, form);
        let name = reader.text("name");
        let grade = reader.grade("grade", grades);
        match (name, grade) {
            (Some(name), Some(grade)) => Ok(SubjectDraft { name, grade }),
            _ => Err(reader.into_error()),
        }
    }

    fn cells(&self, grades: &GradeDirectory) -> Vec<String> {
        vec![self.name.clone(), grades.display(self.grade.as_ref())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    fn grades() -> GradeDirectory {
        GradeDirectory::new(vec![Grade {
            id: 4,
            name: "Form Four".into(),
            level: "4".into(),
        }])
    }

    fn teacher_form() -> FormValues {
        FormValues::new()
            .with("first_name", "Ada")
            .with("last_name", "Lovelace")
            .with("age", "36")
            .with("gender", "Female")
            .with("grade", "4")
    }

    #[test]
    fn test_parse_complete_teacher_form() {
        let draft = Teacher::parse_form(&teacher_form(), &grades()).unwrap();
        assert_eq!(
            draft,
            PersonDraft {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                age: 36,
                gender: Gender::Female,
                grade: 4,
            }
        );
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let form = teacher_form().with("first_name", "  ").with("grade", "");
        let err = Teacher::parse_form(&form, &grades()).unwrap_err();
        assert_eq!(err.missing, vec!["First Name", "Grade"]);
        assert!(err.invalid.is_empty());
    }

    #[test]
    fn test_non_numeric_age_is_invalid() {
        let form = teacher_form().with("age", "thirty");
        let err = Student::parse_form(&form, &grades()).unwrap_err();
        assert_eq!(err.invalid, vec!["Age"]);
    }

    #[test]
    fn test_grade_accepts_name_and_submits_id() {
        let form = FormValues::new()
            .with("name", "Maths")
            .with("grade", "form four");
        let draft = Subject::parse_form(&form, &grades()).unwrap();
        assert_eq!(draft.grade, 4);
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Maths", "grade": 4}));
    }

    #[test]
    fn test_prefill_resolves_grade_name_to_id() {
        let teacher = Teacher {
            id: 9,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 36,
            gender: Gender::Female,
            grade: Some(GradeRef::Name("Form Four".into())),
        };
        let form = teacher.to_form(&grades());
        assert_eq!(form, teacher_form());
        assert_eq!(teacher.cells(&grades())[4], "Form Four");
    }

    #[test]
    fn test_unchanged_update_form_keeps_grade_with_numeric_names() {
        let grades = GradeDirectory::new(vec![
            Grade {
                id: 1,
                name: "2".into(),
                level: "1".into(),
            },
            Grade {
                id: 2,
                name: "3".into(),
                level: "2".into(),
            },
        ]);
        let teacher = Teacher {
            id: 5,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 36,
            gender: Gender::Female,
            grade: Some(GradeRef::Id(2)),
        };

        let form = teacher.to_form(&grades);
        assert_eq!(form.get("grade"), "2");
        let draft = Teacher::parse_form(&form, &grades).unwrap();
        assert_eq!(draft.grade, 2);
        assert_eq!(Teacher::from_draft(teacher.id, draft), teacher);
    }

    #[test]
    fn test_schema_paths() {
        assert_eq!(Teacher::schema().collection_path(), "/teacher/");
        assert_eq!(Student::schema().item_path(3), "/students/3/");
        assert_eq!(Grade::schema().collection_path(), "/grade/");
        assert_eq!(Subject::schema().item_path(12), "/subjects/12/");
    }
}
