//! Test fixtures - reusable content constants for tests.
#![allow(dead_code)]

/// A small page with comments and indentation for the minifier to remove
pub const INDEX_HTML: &str = "<html>\n  <!-- header -->\n  <body>\n    <h1>Hello</h1>\n  </body>\n</html>\n";

/// `INDEX_HTML` after minification
pub const INDEX_HTML_MINIFIED: &str = "<html> <body> <h1>Hello</h1> </body> </html>";

pub const SITE_CSS: &str = "body {\n  color: red;\n}\n";

pub const APP_JS: &str = "// greet\nconsole.log(\"hi\");\n";

/// Configuration pushing to a local directory named `webroot`
pub const FILE_TARGET_CONFIG: &str = r#"
[target]
kind = "file"

[file]
dir = "webroot"
"#;
