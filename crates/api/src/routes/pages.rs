use super::query_or_default;
use crate::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use config::{Product, SiteContent};
use serde::Deserialize;
use std::fmt::Write;

pub const SITE_TITLE: &str = "Twi.am";

#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_product(out: &mut String, product: &Product) {
    let _ = write!(
        out,
        r#"<a class="card" href="{href}"><h2>{name}</h2><span class="domain">{domain}</span><p>{description}</p>"#,
        href = escape_html(&product.href()),
        name = escape_html(&product.name),
        domain = escape_html(&product.domain),
        description = escape_html(&product.description),
    );
    if !product.features.is_empty() {
        out.push_str("<ul>");
        for feature in &product.features {
            let _ = write!(out, "<li>{}</li>", escape_html(feature));
        }
        out.push_str("</ul>");
    }
    out.push_str("</a>");
}

pub fn render_landing(content: Option<&SiteContent>) -> String {
    let mut body = String::new();
    let mut head = String::new();

    match content {
        Some(content) => {
            let _ = write!(
                head,
                r#"<meta property="og:title" content="{}"><meta property="og:description" content="{}"><meta property="og:image" content="{}"><meta property="og:url" content="{}">"#,
                escape_html(&content.og.title),
                escape_html(&content.og.description),
                escape_html(&content.og.image),
                escape_html(&content.og.url),
            );
            let _ = write!(
                body,
                "<header><h1>{}</h1><p class=\"subtitle\">{}</p><p>{}</p></header><section class=\"grid\">",
                SITE_TITLE,
                escape_html(&content.header.subtitle),
                escape_html(&content.og.description),
            );
            for product in &content.products {
                render_product(&mut body, product);
            }
            body.push_str("</section><footer>");
            for link in &content.footer.links {
                let _ = write!(
                    body,
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&link.url),
                    escape_html(&link.text)
                );
            }
            body.push_str("</footer>");
        }
        None => {
            let _ = write!(body, "<header><h1>{}</h1></header>", SITE_TITLE);
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    {head}
</head>
<body>
    <nav><a href="/login">Login</a></nav>
    {body}
</body>
</html>"#,
        title = SITE_TITLE,
        head = head,
        body = body,
    )
}

pub fn render_login(start_href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Login - {title}</title>
</head>
<body>
    <a href="/">Home</a>
    <h1>Welcome to {title}</h1>
    <p>Sign in to your account to access all features</p>
    <a class="login-btn" href="{href}">Login with X</a>
    <p class="terms">By continuing, you agree to {title}'s Terms of Service and Privacy Policy</p>
</body>
</html>"#,
        title = SITE_TITLE,
        href = escape_html(start_href),
    )
}

/// Landing page listing the products from the content file
pub async fn landing_page(State(app): State<AppState>) -> Html<String> {
    Html(render_landing(app.content.as_deref()))
}

/// Login page with the X login button
///
/// The button carries `returnUrl` (or the app URL) through to `/auth/start`.
pub async fn login_page(State(app): State<AppState>, uri: Uri) -> Html<String> {
    let query: LoginPageQuery = query_or_default(&uri);
    let return_url = query
        .return_url
        .filter(|url| !url.is_empty())
        .or_else(|| app.app_url.clone());

    let href = match return_url {
        Some(url) => format!("/auth/start?returnUrl={}", urlencoding::encode(&url)),
        None => "/auth/start".to_string(),
    };

    Html(render_login(&href))
}

/// Site content as JSON
pub async fn site_content(State(app): State<AppState>) -> Response {
    match app.content.as_deref() {
        Some(content) => Json(content.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "not_found",
                "error_description": "Site content is not available"
            })),
        )
            .into_response(),
    }
}
