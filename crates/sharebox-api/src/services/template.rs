//! HTML body of the share notification.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Render the share email. Pure: every argument is escaped and nothing else is read.
pub fn render_share_email(
    email_from: &str,
    download_page_link: &str,
    file_name: &str,
    file_size: &str,
) -> String {
    let from = encode_text(email_from);
    let href = encode_double_quoted_attribute(download_page_link);
    let link = encode_text(download_page_link);
    let name = encode_text(file_name);
    let size = encode_text(file_size);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>File shared with you</title>
</head>
<body style="margin:0;padding:0;background:#f4f5f7;font-family:Helvetica,Arial,sans-serif;color:#1f2933;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0">
    <tr>
      <td align="center" style="padding:32px 16px;">
        <table role="presentation" width="560" cellspacing="0" cellpadding="0" style="background:#ffffff;border-radius:8px;">
          <tr>
            <td style="padding:32px;">
              <h1 style="margin:0 0 16px;font-size:20px;">A file is waiting for you</h1>
              <p style="margin:0 0 24px;font-size:15px;line-height:22px;">
                <strong>{from}</strong> shared a file with you.
              </p>
              <table role="presentation" cellspacing="0" cellpadding="0" style="margin:0 0 24px;font-size:14px;">
                <tr><td style="padding:4px 16px 4px 0;color:#616e7c;">File</td><td>{name}</td></tr>
                <tr><td style="padding:4px 16px 4px 0;color:#616e7c;">Size</td><td>{size}</td></tr>
              </table>
              <a href="{href}" style="display:inline-block;padding:12px 24px;background:#2563eb;color:#ffffff;text-decoration:none;border-radius:6px;font-size:15px;">Download</a>
              <p style="margin:24px 0 0;font-size:12px;color:#9aa5b1;">
                Or paste this link into your browser: {link}
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sender_link_name_and_size() {
        let html = render_share_email(
            "a@x.com",
            "https://share.example.com/download/42",
            "a.txt",
            "0.00 MB",
        );

        assert!(html.contains("a@x.com"));
        assert!(html.contains(r#"href="https://share.example.com/download/42""#));
        assert!(html.contains("a.txt"));
        assert!(html.contains("0.00 MB"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let html = render_share_email(
            "<script>alert(1)</script>",
            "https://share.example.com/download/1\" onclick=\"x",
            "Tom & Jerry's.png",
            "1.00 MB",
        );

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry's.png"));
        assert!(html.contains(
            r#"href="https://share.example.com/download/1&quot; onclick=&quot;x""#
        ));
        assert!(!html.contains(r#"href="https://share.example.com/download/1" onclick"#));
    }

    #[test]
    fn plain_values_pass_through_unchanged() {
        let html = render_share_email("a@x.com", "https://s.example/d/1", "report-2024.pdf", "");

        assert!(html.contains("<td>report-2024.pdf</td>"));
        assert!(html.contains(r#"href="https://s.example/d/1""#));
    }
}
