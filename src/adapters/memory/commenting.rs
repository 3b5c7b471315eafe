use super::IdMinter;
use crate::domain::forms::CatalogForm;
use crate::domain::forms::CommentForm;
use crate::domain::id::Id;
use crate::domain::locale::Proxy;
use crate::domain::model::{Book, Comment, ObjectBasics};
use crate::domain::ports::{CommentQuery, CommentingManager};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub(crate) struct CommentingStore {
    books: Vec<Book>,
    aliases: HashMap<Id, Id>,
    comments: Vec<Comment>,
}

impl CommentingStore {
    fn resolve_book(&self, book_id: &Id) -> Result<Id> {
        if self.books.iter().any(|b| &b.basics.id == book_id) {
            return Ok(book_id.clone());
        }
        self.aliases
            .get(book_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(format!("book {}", book_id)))
    }

    fn book(&self, book_id: &Id) -> Result<&Book> {
        let resolved = self.resolve_book(book_id)?;
        self.books
            .iter()
            .find(|b| b.basics.id == resolved)
            .ok_or_else(|| ServiceError::not_found(format!("book {}", book_id)))
    }

    fn comment_index(&self, book_id: &Id, comment_id: &Id) -> Result<usize> {
        self.comments
            .iter()
            .position(|c| &c.book_id == book_id && &c.basics.id == comment_id)
            .ok_or_else(|| {
                ServiceError::not_found(format!("comment {} in book {}", comment_id, book_id))
            })
    }
}

pub struct InMemoryCommentingManager {
    store: Arc<RwLock<CommentingStore>>,
    minter: IdMinter,
    proxy: Proxy,
}

impl InMemoryCommentingManager {
    pub(crate) fn new(store: Arc<RwLock<CommentingStore>>, minter: IdMinter, proxy: Proxy) -> Self {
        Self {
            store,
            minter,
            proxy,
        }
    }
}

#[async_trait]
impl CommentingManager for InMemoryCommentingManager {
    async fn books(&self) -> Result<Vec<Book>> {
        Ok(self.store.read().await.books.clone())
    }

    async fn book(&self, book_id: &Id) -> Result<Book> {
        self.store.read().await.book(book_id).cloned()
    }

    async fn book_form_for_create(&self) -> Result<CatalogForm> {
        Ok(CatalogForm::default())
    }

    async fn book_form_for_update(&self, book_id: &Id) -> Result<CatalogForm> {
        let store = self.store.read().await;
        Ok(CatalogForm::for_book(store.book(book_id)?))
    }

    async fn create_book(&self, form: CatalogForm) -> Result<Book> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a book create form",
            ));
        }

        let mut basics = ObjectBasics::new(self.minter.mint("commenting.Book"), "Book");
        form.basics.apply_to(&mut basics);
        let book = Book { basics };

        self.store.write().await.books.push(book.clone());
        tracing::debug!("Created book {}", book.basics.id);
        Ok(book)
    }

    async fn update_book(&self, form: CatalogForm) -> Result<Book> {
        let form_id = form
            .id
            .as_ref()
            .ok_or_else(|| ServiceError::invalid_argument("form is not a book update form"))?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_book(form_id)?;
        let book = store
            .books
            .iter_mut()
            .find(|b| b.basics.id == resolved)
            .ok_or_else(|| ServiceError::not_found(format!("book {}", form_id)))?;

        form.basics.apply_to(&mut book.basics);
        Ok(book.clone())
    }

    async fn delete_book(&self, book_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_book(book_id)?;

        if store.comments.iter().any(|c| c.book_id == resolved) {
            return Err(ServiceError::illegal_state(format!(
                "book {} still contains comments",
                book_id
            )));
        }

        store.books.retain(|b| b.basics.id != resolved);
        store.aliases.retain(|_, target| target != &resolved);
        tracing::debug!("Deleted book {}", resolved);
        Ok(())
    }

    async fn alias_book(&self, book_id: &Id, alias_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_book(book_id)?;

        if store.books.iter().any(|b| &b.basics.id == alias_id) {
            return Err(ServiceError::illegal_state(format!(
                "alias {} is already a book id",
                alias_id
            )));
        }

        store.aliases.insert(alias_id.clone(), resolved);
        Ok(())
    }

    async fn comments(&self, book_id: &Id) -> Result<Vec<Comment>> {
        self.comments_by_query(book_id, &CommentQuery::default())
            .await
    }

    async fn comments_by_query(&self, book_id: &Id, query: &CommentQuery) -> Result<Vec<Comment>> {
        let store = self.store.read().await;
        let resolved = store.resolve_book(book_id)?;
        Ok(store
            .comments
            .iter()
            .filter(|c| c.book_id == resolved && query.matches(c))
            .cloned()
            .collect())
    }

    async fn comment(&self, book_id: &Id, comment_id: &Id) -> Result<Comment> {
        let store = self.store.read().await;
        let resolved = store.resolve_book(book_id)?;
        let index = store.comment_index(&resolved, comment_id)?;
        Ok(store.comments[index].clone())
    }

    async fn comment_form_for_create(&self, book_id: &Id, reference_id: &Id) -> Result<CommentForm> {
        self.store.read().await.resolve_book(book_id)?;
        Ok(CommentForm::for_create(reference_id.clone()))
    }

    async fn comment_form_for_update(&self, book_id: &Id, comment_id: &Id) -> Result<CommentForm> {
        let comment = self.comment(book_id, comment_id).await?;
        Ok(CommentForm::for_update(&comment))
    }

    async fn create_comment(&self, book_id: &Id, form: CommentForm) -> Result<Comment> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a comment create form",
            ));
        }

        let mut store = self.store.write().await;
        let resolved = store.resolve_book(book_id)?;

        let mut basics = ObjectBasics::new(self.minter.mint("commenting.Comment"), "Comment");
        form.basics.apply_to(&mut basics);

        let comment = Comment {
            basics,
            book_id: resolved,
            reference_id: form.reference_id,
            commentor_id: self.proxy.agent_id.clone(),
            commenting_agent_id: self.proxy.agent_id.clone(),
            text: form.text,
            start_date: Utc::now(),
            end_date: None,
        };

        store.comments.push(comment.clone());
        tracing::debug!("Created comment {} in book {}", comment.basics.id, comment.book_id);
        Ok(comment)
    }

    async fn update_comment(&self, book_id: &Id, form: CommentForm) -> Result<Comment> {
        let form_id = form
            .id
            .as_ref()
            .ok_or_else(|| ServiceError::invalid_argument("form is not a comment update form"))?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_book(book_id)?;
        let index = store.comment_index(&resolved, form_id)?;

        let comment = &mut store.comments[index];
        form.basics.apply_to(&mut comment.basics);
        comment.text = form.text;
        Ok(comment.clone())
    }

    async fn delete_comment(&self, book_id: &Id, comment_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_book(book_id)?;
        let index = store.comment_index(&resolved, comment_id)?;
        store.comments.remove(index);
        Ok(())
    }
}
