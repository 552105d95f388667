//! Inline HTML for the browser-facing routes.

use crate::models::SessionUser;
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
    <style>
        body { font-family: system-ui, sans-serif; max-width: 720px; margin: 3rem auto; padding: 0 1rem; }
        .avatar { width: 40px; height: 40px; border-radius: 50%; vertical-align: middle; }
        .error { color: #b00020; }
        form { display: flex; flex-direction: column; gap: .5rem; margin: 1rem 0; }
        #messages { border: 1px solid #ddd; min-height: 240px; padding: .75rem; }
    </style>
"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    {STYLE}
</head>
<body>
{body}
</body>
</html>
"#,
        title = encode_text(title),
    )
}

fn user_header(user: &SessionUser) -> String {
    let display_name = if user.name.is_empty() {
        &user.email
    } else {
        &user.name
    };
    let avatar = if user.avatar_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="avatar" src="{}" alt="">"#,
            encode_double_quoted_attribute(&user.avatar_url)
        )
    };

    format!(
        r#"<header>{avatar} <strong>{name}</strong> <a href="/auth/logout">Log out</a></header>"#,
        name = encode_text(display_name),
    )
}

pub fn landing_page(user: Option<&SessionUser>) -> String {
    let body = match user {
        Some(user) => format!(
            r#"{header}
<h1>Create an agent</h1>
<form id="agent-form">
    <textarea id="prompt" rows="4" placeholder="Describe the agent you want"></textarea>
    <button type="submit">Generate</button>
</form>
<p id="status" class="error"></p>
<script>
document.getElementById('agent-form').addEventListener('submit', async (event) => {{
    event.preventDefault();
    const prompt = document.getElementById('prompt').value;
    const response = await fetch('/generate-agent', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ prompt }})
    }});
    const data = await response.json();
    if (response.ok) {{
        window.location.href = '/chat?message=' + encodeURIComponent(prompt);
    }} else {{
        document.getElementById('status').textContent = data.error;
    }}
}});
</script>"#,
            header = user_header(user),
        ),
        None => r#"<h1>Welcome</h1>
<p><a href="/auth/google">Sign in with Google</a></p>
<h2>Create an account</h2>
<form id="signup-form">
    <input id="email" type="email" placeholder="Email" required>
    <input id="password" type="password" placeholder="Password" required>
    <button type="submit">Sign up</button>
</form>
<p id="status" class="error"></p>
<script>
document.getElementById('signup-form').addEventListener('submit', async (event) => {
    event.preventDefault();
    const response = await fetch('/auth/signup', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
            email: document.getElementById('email').value,
            password: document.getElementById('password').value
        })
    });
    const data = await response.json();
    if (response.ok) {
        window.location.href = '/';
    } else {
        document.getElementById('status').textContent = data.error;
    }
});
</script>"#
            .to_string(),
    };

    layout("Agent Gateway", &body)
}

/// Static page for the implicit flow: reads the tokens from the URL fragment and
/// posts them to `/auth/set-session`.
pub fn callback_page() -> String {
    layout(
        "Signing in...",
        r#"<p id="status">Completing sign-in...</p>
<script>
(async () => {
    const status = document.getElementById('status');
    const params = new URLSearchParams(window.location.hash.substring(1));
    const error = params.get('error_description') || params.get('error');
    if (error) {
        status.textContent = error;
        status.className = 'error';
        return;
    }
    const accessToken = params.get('access_token');
    if (!accessToken) {
        status.textContent = 'No access token received. Please try signing in again.';
        status.className = 'error';
        return;
    }
    const response = await fetch('/auth/set-session', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
            access_token: accessToken,
            refresh_token: params.get('refresh_token') || ''
        })
    });
    if (response.ok) {
        window.location.replace('/');
    } else {
        const data = await response.json();
        status.textContent = data.error;
        status.className = 'error';
    }
})();
</script>"#,
    )
}

pub fn chat_page(user: &SessionUser, initial_message: &str) -> String {
    let body = format!(
        r#"{header}
<h1>Chat</h1>
<div id="messages"></div>
<form id="chat-form" data-initial-message="{initial}">
    <input id="message" type="text" placeholder="Type a message">
    <button type="submit">Send</button>
</form>
<script>
const form = document.getElementById('chat-form');
const log = document.getElementById('messages');

function append(text) {{
    const line = document.createElement('p');
    line.textContent = text;
    log.appendChild(line);
}}

async function send(message) {{
    append(message);
    const response = await fetch('/send-message', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ message }})
    }});
    const data = await response.json();
    append(response.ok ? data.message : data.error);
}}

form.addEventListener('submit', (event) => {{
    event.preventDefault();
    const input = document.getElementById('message');
    if (input.value) {{
        send(input.value);
        input.value = '';
    }}
}});

if (form.dataset.initialMessage) {{
    send(form.dataset.initialMessage);
}}
</script>"#,
        header = user_header(user),
        initial = encode_double_quoted_attribute(initial_message),
    );

    layout("Chat", &body)
}

pub fn error_page(message: &str) -> String {
    layout(
        "Error",
        &format!(
            r#"<h1>Error</h1><p class="error">{}</p><p><a href="/">Back to start</a></p>"#,
            encode_text(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: name.to_string(),
            avatar_url: String::new(),
        }
    }

    #[test]
    fn anonymous_landing_offers_sign_in() {
        let html = landing_page(None);
        assert!(html.contains(r#"href="/auth/google""#));
        assert!(html.contains("/auth/signup"));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn signed_in_landing_greets_user() {
        let html = landing_page(Some(&user("Ada")));
        assert!(html.contains("<strong>Ada</strong>"));
        assert!(html.contains("/generate-agent"));
    }

    #[test]
    fn falls_back_to_email_without_name() {
        let html = landing_page(Some(&user("")));
        assert!(html.contains("<strong>a@b.com</strong>"));
    }

    #[test]
    fn user_values_are_escaped() {
        let html = chat_page(&user("<script>x</script>"), r#""><img src=x onerror=alert(1)>"#);
        assert!(!html.contains("<script>x</script>"));
        assert!(!html.contains(r#""><img src=x"#));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_page_links_home() {
        let html = error_page("Invalid code");
        assert!(html.contains("Invalid code"));
        assert!(html.contains(r#"href="/""#));
    }
}
