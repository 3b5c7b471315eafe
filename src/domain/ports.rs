use crate::domain::forms::{
    CatalogForm, ColumnForm, CommentForm, EntryForm, GradeForm, GradeSystemForm,
};
use crate::domain::id::{Id, Type};
use crate::domain::locale::Proxy;
use crate::domain::model::{
    Book, Comment, Grade, GradeEntry, GradeSystem, Gradebook, GradebookColumn,
};
use crate::domain::summary::ColumnSummary;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Entry point into the external service layer.
#[async_trait]
pub trait ServiceRuntime: Send + Sync {
    async fn commenting_manager(&self, proxy: &Proxy) -> Result<Arc<dyn CommentingManager>>;
    async fn grading_manager(&self, proxy: &Proxy) -> Result<Arc<dyn GradingManager>>;
}

/// Terms of a comment query; every present term must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentQuery {
    pub genus_type_id: Option<Type>,
    pub reference_id: Option<Id>,
    pub commentor_id: Option<Id>,
}

impl CommentQuery {
    pub fn is_empty(&self) -> bool {
        self.genus_type_id.is_none() && self.reference_id.is_none() && self.commentor_id.is_none()
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        self.genus_type_id
            .as_ref()
            .map_or(true, |t| t == &comment.basics.genus_type_id)
            && self
                .reference_id
                .as_ref()
                .map_or(true, |r| r == &comment.reference_id)
            && self
                .commentor_id
                .as_ref()
                .map_or(true, |c| c == &comment.commentor_id)
    }
}

#[async_trait]
pub trait CommentingManager: Send + Sync {
    async fn books(&self) -> Result<Vec<Book>>;
    async fn book(&self, book_id: &Id) -> Result<Book>;
    async fn book_form_for_create(&self) -> Result<CatalogForm>;
    async fn book_form_for_update(&self, book_id: &Id) -> Result<CatalogForm>;
    async fn create_book(&self, form: CatalogForm) -> Result<Book>;
    async fn update_book(&self, form: CatalogForm) -> Result<Book>;
    async fn delete_book(&self, book_id: &Id) -> Result<()>;
    async fn alias_book(&self, book_id: &Id, alias_id: &Id) -> Result<()>;

    async fn comments(&self, book_id: &Id) -> Result<Vec<Comment>>;
    async fn comments_by_query(&self, book_id: &Id, query: &CommentQuery) -> Result<Vec<Comment>>;
    async fn comment(&self, book_id: &Id, comment_id: &Id) -> Result<Comment>;
    async fn comment_form_for_create(&self, book_id: &Id, reference_id: &Id) -> Result<CommentForm>;
    async fn comment_form_for_update(&self, book_id: &Id, comment_id: &Id) -> Result<CommentForm>;
    async fn create_comment(&self, book_id: &Id, form: CommentForm) -> Result<Comment>;
    async fn update_comment(&self, book_id: &Id, form: CommentForm) -> Result<Comment>;
    async fn delete_comment(&self, book_id: &Id, comment_id: &Id) -> Result<()>;
}

#[async_trait]
pub trait GradingManager: Send + Sync {
    async fn gradebooks(&self) -> Result<Vec<Gradebook>>;
    async fn gradebook(&self, gradebook_id: &Id) -> Result<Gradebook>;
    async fn gradebook_form_for_create(&self) -> Result<CatalogForm>;
    async fn gradebook_form_for_update(&self, gradebook_id: &Id) -> Result<CatalogForm>;
    async fn create_gradebook(&self, form: CatalogForm) -> Result<Gradebook>;
    async fn update_gradebook(&self, form: CatalogForm) -> Result<Gradebook>;
    async fn delete_gradebook(&self, gradebook_id: &Id) -> Result<()>;
    async fn alias_gradebook(&self, gradebook_id: &Id, alias_id: &Id) -> Result<()>;

    async fn grade_systems(&self, gradebook_id: &Id) -> Result<Vec<GradeSystem>>;
    async fn grade_system(&self, gradebook_id: &Id, grade_system_id: &Id) -> Result<GradeSystem>;
    async fn grade_system_form_for_create(&self, gradebook_id: &Id) -> Result<GradeSystemForm>;
    async fn grade_system_form_for_update(
        &self,
        gradebook_id: &Id,
        grade_system_id: &Id,
    ) -> Result<GradeSystemForm>;
    async fn create_grade_system(&self, gradebook_id: &Id, form: GradeSystemForm)
        -> Result<GradeSystem>;
    async fn update_grade_system(&self, gradebook_id: &Id, form: GradeSystemForm)
        -> Result<GradeSystem>;
    async fn delete_grade_system(&self, gradebook_id: &Id, grade_system_id: &Id) -> Result<()>;

    async fn grade_form_for_create(&self, gradebook_id: &Id, grade_system_id: &Id)
        -> Result<GradeForm>;
    async fn create_grade(&self, gradebook_id: &Id, form: GradeForm) -> Result<Grade>;
    async fn delete_grade(&self, gradebook_id: &Id, grade_id: &Id) -> Result<()>;

    async fn gradebook_columns(&self, gradebook_id: &Id) -> Result<Vec<GradebookColumn>>;
    async fn gradebook_column(&self, gradebook_id: &Id, column_id: &Id) -> Result<GradebookColumn>;
    async fn column_form_for_create(&self, gradebook_id: &Id) -> Result<ColumnForm>;
    async fn column_form_for_update(&self, gradebook_id: &Id, column_id: &Id) -> Result<ColumnForm>;
    async fn create_gradebook_column(&self, gradebook_id: &Id, form: ColumnForm)
        -> Result<GradebookColumn>;
    async fn update_gradebook_column(&self, gradebook_id: &Id, form: ColumnForm)
        -> Result<GradebookColumn>;
    async fn delete_gradebook_column(&self, gradebook_id: &Id, column_id: &Id) -> Result<()>;

    async fn grade_entries(&self, gradebook_id: &Id) -> Result<Vec<GradeEntry>>;
    async fn grade_entries_for_column(&self, gradebook_id: &Id, column_id: &Id)
        -> Result<Vec<GradeEntry>>;
    async fn grade_entry(&self, gradebook_id: &Id, entry_id: &Id) -> Result<GradeEntry>;
    async fn entry_form_for_create(
        &self,
        gradebook_id: &Id,
        column_id: &Id,
        resource_id: &Id,
    ) -> Result<EntryForm>;
    async fn entry_form_for_update(&self, gradebook_id: &Id, entry_id: &Id) -> Result<EntryForm>;
    async fn create_grade_entry(&self, gradebook_id: &Id, form: EntryForm) -> Result<GradeEntry>;
    async fn update_grade_entry(&self, gradebook_id: &Id, form: EntryForm) -> Result<GradeEntry>;
    async fn delete_grade_entry(&self, gradebook_id: &Id, entry_id: &Id) -> Result<()>;

    async fn gradebook_column_summary(&self, gradebook_id: &Id, column_id: &Id)
        -> Result<ColumnSummary>;
}
