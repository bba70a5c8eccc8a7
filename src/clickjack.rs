//! Clickjacking proof-of-concept page generator.

/// PoC page framing the target at half opacity, so overlap between the
/// framed page and a decoy is visible.
const POC_TEMPLATE: &str = r#"<html>
   <head>
      <title>Clickjacking Example PoC</title>
      <style>
         body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
         }
         .container {
            max-width: 1200px;
            margin: 0 auto;
         }
         h1 {
            color: #333;
            margin-bottom: 20px;
         }
         .iframe-container {
            position: relative;
            width: 100%;
            height: 80vh;
         }
         iframe {
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            opacity: 0.5;
            border: 2px solid #333;
         }
      </style>
   </head>
   <body>
      <div class="container">
         <h1>Clickjacking PoC</h1>
         <div class="iframe-container">
            <iframe src="{url}"></iframe>
         </div>
      </div>
   </body>
</html>"#;

pub fn generate(url: &str) -> String {
    POC_TEMPLATE.replace("{url}", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_url_is_framed() {
        let page = generate("https://example.com/transfer");
        assert!(page.contains(r#"<iframe src="https://example.com/transfer"></iframe>"#));
        assert!(page.contains("opacity: 0.5"));
    }
}
