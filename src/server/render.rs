// src/server/render.rs
// HTML for the web front end: the form page and the results page.
// maud escapes every interpolated value, so link text and hrefs are safe as-is.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::crawl::Harvest;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}\
input[type=text]{width:100%;padding:.4rem;margin:.2rem 0 .8rem}\
li{word-break:break-all}.muted{color:#666}";

pub fn home_page() -> String {
    let body = html! {
        h1 { "link-harvester" }
        form method="post" action="/crawl" {
            label for="url" { "Start URL" }
            input type="text" id="url" name="url" placeholder="https://example.com/";
            label for="extensions" { "Extensions (comma separated)" }
            input type="text" id="extensions" name="extensions" placeholder=".jpg,.png,.pdf";
            button type="submit" { "Crawl" }
        }
    };
    page("link-harvester", body).into_string()
}

pub fn results_page(harvest: &Harvest) -> String {
    let report = &harvest.report;
    let body = html! {
        h1 { "Results for " (report.seed.as_str()) }
        p.muted {
            (report.pages_fetched) " page(s) crawled, "
            (report.discovered.len()) " link(s) discovered, "
            (harvest.matches.len()) " matching " (harvest.extensions.join(","))
        }
        @if harvest.matches.is_empty() {
            p { "No matching links found." }
        } @else {
            ul {
                @for link in &harvest.matches {
                    li { a href=(link.as_str()) { (link.as_str()) } }
                }
            }
        }
        p { a href="/" { "New crawl" } }
    };
    page("link-harvester results", body).into_string()
}

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}
