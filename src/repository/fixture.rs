// src/repository/fixture.rs

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::QuizRepository;
use crate::{
    config::DEFAULT_OWNER_ID,
    error::AppError,
    models::quiz_item::{NewQuizItem, QuizItem, QuizOption},
};

/// Read-only repository over two built-in items.
#[derive(Debug, Clone)]
pub struct FixtureQuizRepository {
    items: BTreeMap<i64, QuizItem>,
}

fn options(values: [&str; 3]) -> Vec<QuizOption> {
    values
        .iter()
        .map(|v| QuizOption {
            value: v.to_string(),
            label: v.to_string(),
        })
        .collect()
}

fn fixture(id: i64, title: &str, description: &str, code: &str, opts: [&str; 3], answer: &str) -> QuizItem {
    QuizItem {
        id,
        title: title.to_string(),
        description: description.to_string(),
        code: code.to_string(),
        options: options(opts),
        answer: answer.to_string(),
        is_public: true,
        user_id: DEFAULT_OWNER_ID,
        created_at: None,
        updated_at: None,
    }
}

impl FixtureQuizRepository {
    pub fn new() -> Self {
        let items = [
            fixture(
                1,
                "Addition",
                "2つの数値を足し算する関数です。???に適切な名前を選んでください。",
                "function ???(a, b) {\n  return a + b;\n}",
                ["add", "func", "doSomething"],
                "add",
            ),
            fixture(
                2,
                "User Name",
                "ユーザー情報を受け取り、フルネームを返す関数です。???に適切な名前を選んでください。",
                "function ???(user) {\n  return user.firstName + ' ' + user.lastName;\n}",
                ["getUserName", "processUser", "stringfy"],
                "getUserName",
            ),
        ]
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

        Self { items }
    }
}

impl Default for FixtureQuizRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizRepository for FixtureQuizRepository {
    async fn create(&self, _item: &NewQuizItem) -> Result<i64, AppError> {
        Err(AppError::InternalServerError(
            "fixture repository is read-only".to_string(),
        ))
    }

    async fn get_by_id(&self, id: i64) -> Result<QuizItem, AppError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound(format!("Function {} not found", id)))
    }

    async fn list_all(&self) -> Result<Vec<QuizItem>, AppError> {
        Ok(self.items.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_both_items() {
        let repo = FixtureQuizRepository::new();
        let items = repo.list_all().await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);

        for item in &items {
            assert_eq!(item.options.len(), 3);
            assert!(item.code.contains("???"));
            assert!(item.options.iter().any(|o| o.value == item.answer));
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let repo = FixtureQuizRepository::new();
        assert!(matches!(
            repo.get_by_id(99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn create_is_rejected() {
        let repo = FixtureQuizRepository::new();
        let item = NewQuizItem {
            title: "x".to_string(),
            description: String::new(),
            code: "???".to_string(),
            options: options(["a", "b", "c"]),
            answer: "a".to_string(),
            is_public: false,
        };
        assert!(repo.create(&item).await.is_err());
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }
}
