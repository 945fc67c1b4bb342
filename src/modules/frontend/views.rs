//! HTML rendering for the frontend. Every interpolated value goes through
//! [`escape_html`].

use std::collections::BTreeSet;
use std::fmt::Write as _;

use bookshelf_db::Book;

use crate::utils::escape_html;

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Bookshelf</title>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/books">Books</a>
<a href="/authors">Authors</a>
<a href="/years">Years</a>
<a href="/search">Search</a>
</nav>
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn index() -> String {
    layout(
        "Home",
        "<h1>Bookshelf</h1>\n<p>Browse the catalogue by book, author or year, or search it.</p>",
    )
}

pub fn book_table(books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        // Writing into a String cannot fail.
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&book.id),
            escape_html(&book.title),
            escape_html(&book.author),
            escape_html(&book.pages),
            escape_html(&book.edition),
            escape_html(&book.year),
        );
    }

    let content = format!(
        "<h1>Books</h1>\n<table>\n<thead><tr><th>ID</th><th>Title</th><th>Author</th><th>Pages</th><th>Edition</th><th>Year</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
    );
    layout("Books", &content)
}

fn value_list(heading: &str, class: &str, values: &BTreeSet<String>) -> String {
    let mut items = String::new();
    for value in values {
        let _ = writeln!(items, "<li>{}</li>", escape_html(value));
    }
    let content = format!("<h1>{heading}</h1>\n<ul class=\"{class}\">\n{items}</ul>");
    layout(heading, &content)
}

pub fn author_list(authors: &BTreeSet<String>) -> String {
    value_list("Authors", "authors", authors)
}

pub fn year_list(years: &BTreeSet<String>) -> String {
    value_list("Years", "years", years)
}

pub fn search() -> String {
    layout(
        "Search",
        r#"<h1>Search</h1>
<form class="search-bar" action="/books" method="get">
<input type="search" name="q" placeholder="Title, author or year" aria-label="Search books">
<button type="submit">Search</button>
</form>"#,
    )
}

pub fn error(message: &str) -> String {
    let content = format!(
        "<h1>Something went wrong</h1>\n<p class=\"error\">{}</p>",
        escape_html(message)
    );
    layout("Error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_table_escapes_values() {
        let book = Book {
            id: "x1".into(),
            title: "<script>alert(1)</script>".into(),
            author: "A & B".into(),
            pages: "1".into(),
            edition: "1".into(),
            year: "2000".into(),
        };

        let html = book_table(&[book]);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<td>A &amp; B</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn lists_render_one_item_per_value() {
        let authors: BTreeSet<String> = ["B", "A"].into_iter().map(String::from).collect();

        let html = author_list(&authors);

        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.find("<li>A</li>").unwrap() < html.find("<li>B</li>").unwrap());
    }
}
