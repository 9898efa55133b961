use crate::EntityId;
use crate::entity::Entity;

/// 一次成功请求之后对本地集合的修补
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    /// 服务端返回的新记录（带服务端分配的 id）
    Created(T),
    /// 以提交值替换同 id 的记录
    Updated(T),
    Removed(EntityId),
}

/// 本地缓存的实体集合，按 id 保持与服务端一致
///
/// 只在请求成功后通过 [`EntityCollection::apply`] 修补，失败的请求不会触碰它。
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection<T> {
    items: Vec<T>,
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以服务端列表构建，重复 id 只保留第一条
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut collection = Self::new();
        for item in items {
            if !collection.contains(item.id()) {
                collection.items.push(item);
            }
        }
        collection
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn apply(&mut self, mutation: Mutation<T>) {
        match mutation {
            Mutation::Created(record) | Mutation::Updated(record) => self.upsert(record),
            Mutation::Removed(id) => self.items.retain(|item| item.id() != id),
        }
    }

    /// 同 id 原位替换，否则追加到末尾
    fn upsert(&mut self, record: T) {
        let id = record.id();
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => *slot = record,
            None => self.items.push(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grade;

    fn grade(id: EntityId, name: &str) -> Grade {
        Grade {
            id,
            name: name.into(),
            level: "1".into(),
        }
    }

    #[test]
    fn test_from_vec_drops_duplicate_ids() {
        let c = EntityCollection::from_vec(vec![grade(1, "a"), grade(2, "b"), grade(1, "c")]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(1).unwrap().name, "a");
    }

    #[test]
    fn test_created_appears_once() {
        let mut c = EntityCollection::from_vec(vec![grade(1, "a")]);
        c.apply(Mutation::Created(grade(2, "b")));
        c.apply(Mutation::Created(grade(2, "b")));
        assert_eq!(c.len(), 2);
        assert_eq!(c.items().last().unwrap().id, 2);
    }

    #[test]
    fn test_updated_keeps_position() {
        let mut c = EntityCollection::from_vec(vec![grade(1, "a"), grade(2, "b"), grade(3, "c")]);
        c.apply(Mutation::Updated(grade(2, "renamed")));
        let names: Vec<_> = c.items().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["a", "renamed", "c"]);
    }

    #[test]
    fn test_removed() {
        let mut c = EntityCollection::from_vec(vec![grade(1, "a"), grade(2, "b")]);
        c.apply(Mutation::Removed(1));
        assert!(!c.contains(1));
        assert_eq!(c.len(), 1);
        // 删除不存在的 id 无副作用
        c.apply(Mutation::Removed(42));
        assert_eq!(c.len(), 1);
    }
}
