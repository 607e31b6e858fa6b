//! HTML pages
//!
//! Every user-supplied value goes through `escape` before it is written out.

use contact_types::ContactEntry;

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn text_input(name: &str, label: &str, kind: &str) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label> <input type="{kind}" id="{name}" name="{name}"></p>"#
    )
}

pub fn index_page() -> String {
    let mut body = String::from("<h1>Contact us</h1>\n<form method=\"post\" action=\"/contact\">\n");

    for (name, label, kind) in [
        ("firstName", "First name", "text"),
        ("lastName", "Last name", "text"),
        ("jobTitle", "Job title", "text"),
        ("company", "Company", "text"),
        ("email", "Email", "email"),
    ] {
        body.push_str(&text_input(name, label, kind));
        body.push('\n');
    }

    body.push_str(concat!(
        r#"<p><label><input type="checkbox" name="mailingList" value="yes"> Join the mailing list</label></p>"#,
        "\n",
        r#"<p>Email format: <label><input type="radio" name="format" value="html" checked> HTML</label> "#,
        r#"<label><input type="radio" name="format" value="text"> Text</label></p>"#,
        "\n",
    ));

    for (name, label) in [
        ("linkedin", "LinkedIn"),
        ("meet", "How did we meet?"),
        ("other", "Other"),
    ] {
        body.push_str(&text_input(name, label, "text"));
        body.push('\n');
    }

    body.push_str(concat!(
        r#"<p><label for="message">Message</label><br><textarea id="message" name="message" rows="6" cols="60"></textarea></p>"#,
        "\n",
        r#"<p><button type="submit">Send</button></p>"#,
        "\n</form>\n",
    ));

    layout("Contact", &body)
}

pub fn confirmation_page(entry: &ContactEntry) -> String {
    let c = &entry.contact;
    let name = entry.display_name();
    let greeting = if name.is_empty() {
        "Thanks for getting in touch!".to_string()
    } else {
        format!("Thanks, {}!", escape(&name))
    };

    let mut body = format!("<h1>{}</h1>\n<p>We received your message.</p>\n<dl>\n", greeting);
    for (label, value) in [
        ("Email", c.email.as_str()),
        ("Company", c.company.as_str()),
        ("Job title", c.job_title.as_str()),
        ("Mailing list", if c.mailing_list { "yes" } else { "no" }),
        ("Format", c.format.as_str()),
        ("Message", c.message.as_str()),
    ] {
        body.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", label, escape(value)));
    }
    body.push_str("</dl>\n<p><a href=\"/\">Back</a></p>\n");

    layout("Thank you", &body)
}

pub fn admin_page(entries: &[ContactEntry]) -> String {
    let mut body = format!("<h1>Submissions ({})</h1>\n", entries.len());

    if entries.is_empty() {
        body.push_str("<p>No submissions yet.</p>\n");
        return layout("Admin", &body);
    }

    body.push_str(concat!(
        "<table>\n<thead><tr>",
        "<th>#</th><th>Received</th><th>Name</th><th>Job title</th><th>Company</th>",
        "<th>Email</th><th>Mailing list</th><th>Format</th><th>LinkedIn</th>",
        "<th>Met</th><th>Other</th><th>Message</th>",
        "</tr></thead>\n<tbody>\n",
    ));

    for entry in entries {
        let c = &entry.contact;
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            escape(&entry.display_name()),
            escape(&c.job_title),
            escape(&c.company),
            escape(&c.email),
            if c.mailing_list { "yes" } else { "no" },
            c.format,
            escape(&c.linkedin),
            escape(&c.meet),
            escape(&c.other),
            escape(&c.message),
        ));
    }

    body.push_str("</tbody>\n</table>\n");
    layout("Admin", &body)
}
