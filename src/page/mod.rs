//! Landing page generation
//!
//! "Do X": Render the `index.html` pushed into every new repository.
//!
//! Values are substituted verbatim. A repository name or owner containing
//! markup will end up in the page as markup.

/// File name the page is written to at the repository root.
pub const INDEX_FILE: &str = "index.html";

/// Render the landing page for `repo_name`, credited to `owner`.
pub fn render_index_html(repo_name: &str, owner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{repo_name} - GitHub Page</title>
    <style>
        body {{
            font-family: 'Inter', sans-serif;
            display: flex;
            flex-direction: column;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            background-color: #f0f4f8;
            color: #1a202c;
            text-align: center;
        }}
        .container {{
            padding: 2rem;
            border-radius: 12px;
            background: white;
            box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05);
            max-width: 90%;
        }}
        h1 {{
            color: #4c51bf;
            margin-bottom: 0.5rem;
        }}
        p {{
            color: #4a5568;
            font-size: 1.1rem;
        }}
        .badge {{
            display: inline-block;
            padding: 0.3rem 0.7rem;
            margin-top: 1rem;
            border-radius: 9999px;
            background-color: #667eea;
            color: white;
            font-weight: bold;
            text-transform: uppercase;
            font-size: 0.75rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Deployment Success!</h1>
        <p>This page was deployed automatically through the GitHub CLI.</p>
        <p>This is the content for the repository:</p>
        <h2>{repo_name}</h2>
        <span class="badge">Created by {owner}</span>
    </div>
</body>
</html>"#
    )
}
