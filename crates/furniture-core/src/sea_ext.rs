use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Condition, Expr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Select};

use furniture_domain::pagination::PageRequest;

pub trait SelectExt {
    /// Apply the page window as `OFFSET`/`LIMIT`. `None` keeps every row.
    fn paginate_by(self, page: Option<PageRequest>) -> Self;

    /// Keep rows where any of `columns` contains `needle`, case-insensitively.
    /// A blank needle leaves the query unchanged.
    fn search_any<C: ColumnTrait>(self, columns: &[C], needle: &str) -> Self;
}

impl<E> SelectExt for Select<E>
where
    E: EntityTrait,
{
    fn paginate_by(self, page: Option<PageRequest>) -> Self {
        match page.map(PageRequest::clamped) {
            Some(page) => self.offset(page.offset()).limit(page.limit()),
            None => self,
        }
    }

    fn search_any<C: ColumnTrait>(self, columns: &[C], needle: &str) -> Self {
        let needle = needle.trim();
        if needle.is_empty() || columns.is_empty() {
            return self;
        }
        let pattern = like_pattern(needle);
        let condition = columns.iter().fold(Condition::any(), |cond, col| {
            cond.add(Expr::col((col.entity_name(), *col)).ilike(pattern.clone()))
        });
        self.filter(condition)
    }
}

/// `%needle%` with LIKE metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
