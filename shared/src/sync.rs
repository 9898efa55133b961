//! 通用的「列表-变更-同步」流程
//!
//! 每个操作先完成网络请求，再返回一个 [`Mutation`]；调用方在成功后把它
//! 应用到本地集合。请求失败时不产生任何修补，集合保持原样。

use crate::api::SchoolApi;
use crate::collection::{EntityCollection, Mutation};
use crate::directory::GradeDirectory;
use crate::entity::{Entity, FormValues};
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::Grade;

/// 删除前的确认提示（浏览器中为 `window.confirm`）
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// 模态框的编辑目标
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget<T> {
    Create,
    Update(T),
}

impl<T: Entity> EditTarget<T> {
    pub fn title(&self) -> String {
        match self {
            EditTarget::Create => format!("Add {}", T::schema().singular),
            EditTarget::Update(_) => format!("Update {}", T::schema().singular),
        }
    }

    /// 新增为空表单，更新时用现有记录预填
    pub fn prefill(&self, grades: &GradeDirectory) -> FormValues {
        match self {
            EditTarget::Create => FormValues::new(),
            EditTarget::Update(record) => record.to_form(grades),
        }
    }
}

/// 页面挂载时加载的数据
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    pub records: EntityCollection<T>,
    pub grades: GradeDirectory,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            records: EntityCollection::default(),
            grades: GradeDirectory::default(),
        }
    }
}

/// 加载集合；需要班级的实体同时加载 `/grade/`
pub async fn load<T, C>(api: &SchoolApi<C>) -> ApiResult<PageData<T>>
where
    T: Entity,
    C: HttpClient,
{
    let (records, grades) = if T::schema().needs_grades {
        let (records, grades) = futures::join!(api.list::<T>(), api.list::<Grade>());
        (records?, grades?)
    } else {
        (api.list::<T>().await?, Vec::new())
    };

    Ok(PageData {
        records: EntityCollection::from_vec(records),
        grades: GradeDirectory::new(grades),
    })
}

/// 只加载班级目录（独立的新增页面使用）
pub async fn load_grades<C: HttpClient>(api: &SchoolApi<C>) -> ApiResult<GradeDirectory> {
    Ok(GradeDirectory::new(api.list::<Grade>().await?))
}

/// 提交模态框
///
/// 先做必填校验，校验失败时不发送任何请求。
/// 新增使用服务端返回的记录；更新以提交值和原 id 构造记录。
pub async fn submit<T, C>(
    api: &SchoolApi<C>,
    target: &EditTarget<T>,
    form: &FormValues,
    grades: &GradeDirectory,
) -> ApiResult<Mutation<T>>
where
    T: Entity,
    C: HttpClient,
{
    let schema = T::schema();
    let draft = T::parse_form(form, grades).inspect_err(|e| {
        log::warn!("[Sync] {} rejected by validation: {}", schema.op("submit"), e);
    })?;

    let result = match target {
        EditTarget::Create => api.create::<T>(&draft).await.map(Mutation::Created),
        EditTarget::Update(existing) => {
            let id = existing.id();
            api.update::<T>(id, &draft)
                .await
                .map(|_| Mutation::Updated(T::from_draft(id, draft)))
        }
    };

    if let Err(e) = &result {
        log::error!("[Sync] {}", e);
    }
    result
}

/// 确认后删除
///
/// 用户取消时返回 `Ok(None)`，且不发送请求。
pub async fn remove<T, C>(
    api: &SchoolApi<C>,
    record: &T,
    confirm: &dyn Confirm,
) -> ApiResult<Option<Mutation<T>>>
where
    T: Entity,
    C: HttpClient,
{
    let schema = T::schema();
    let prompt = format!(
        "Delete this {}? You won't be able to revert this!",
        schema.singular.to_lowercase()
    );
    if !confirm.confirm(&prompt) {
        log::debug!("[Sync] {} cancelled", schema.op("delete"));
        return Ok(None);
    }

    let id = record.id();
    match api.delete::<T>(id).await {
        Ok(()) => Ok(Some(Mutation::Removed(id))),
        Err(e) => {
            log::error!("[Sync] {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests;
