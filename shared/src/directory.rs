use crate::{EntityId, Grade, GradeRef};

/// 班级查找表
///
/// 所有班级引用都通过这里解析：按 id 精确匹配，按名称忽略大小写匹配。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeDirectory {
    grades: Vec<Grade>,
}

impl GradeDirectory {
    pub fn new(grades: Vec<Grade>) -> Self {
        Self { grades }
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn by_id(&self, id: EntityId) -> Option<&Grade> {
        self.grades.iter().find(|g| g.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Grade> {
        let name = name.trim();
        self.grades.iter().find(|g| g.name.eq_ignore_ascii_case(name))
    }

    pub fn resolve(&self, grade: &GradeRef) -> Option<&Grade> {
        match grade {
            GradeRef::Id(id) => self.by_id(*id),
            // 名称优先，其次把纯数字名称当作 id
            GradeRef::Name(name) => self
                .by_name(name)
                .or_else(|| name.trim().parse().ok().and_then(|id| self.by_id(id))),
        }
    }

    /// 规范化为 id 引用；无法解析时原样返回
    pub fn canonicalize(&self, grade: &GradeRef) -> GradeRef {
        self.resolve(grade)
            .map(|g| GradeRef::Id(g.id))
            .unwrap_or_else(|| grade.clone())
    }

    /// 解析表单输入
    ///
    /// 下拉框的值总是 id，因此先按 id 查找，再回退到名称。
    pub fn resolve_input(&self, input: &str) -> Option<EntityId> {
        let input = input.trim();
        input
            .parse::<EntityId>()
            .ok()
            .and_then(|id| self.by_id(id))
            .or_else(|| self.by_name(input))
            .map(|g| g.id)
    }

    /// 表格中显示的班级名称
    pub fn display(&self, grade: Option<&GradeRef>) -> String {
        match grade {
            None => "-".to_string(),
            Some(r) => match self.resolve(r) {
                Some(g) => g.name.clone(),
                None => match r {
                    GradeRef::Id(id) => format!("#{}", id),
                    GradeRef::Name(name) => name.clone(),
                },
            },
        }
    }

    /// 表单预填值：解析得到的 id 字符串，未知引用为空
    pub fn form_value(&self, grade: Option<&GradeRef>) -> String {
        grade
            .and_then(|r| self.resolve(r))
            .map(|g| g.id.to_string())
            .unwrap_or_default()
    }

    /// 下拉框选项 (value, label)
    pub fn options(&self) -> Vec<(String, String)> {
        self.grades
            .iter()
            .map(|g| (g.id.to_string(), g.name.clone()))
            .collect()
    }
}
