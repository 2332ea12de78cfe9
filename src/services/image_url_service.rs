//! Builds display URLs for CDN-hosted images by splicing a transformation
//! segment into the delivery path. Upload and storage stay with the CDN.

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: String,
    pub fetch_format: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            width: Some(500),
            height: Some(500),
            quality: "auto".to_string(),
            fetch_format: true,
        }
    }
}

pub fn is_cloudinary_url(url: &str) -> bool {
    url.contains("cloudinary.com") || url.contains("res.cloudinary.com")
}

/// Inserts a transformation segment after `/upload/`. Non-CDN URLs and URLs
/// without exactly one `/upload/` marker pass through unchanged, so calling
/// this on arbitrary image URLs is safe.
pub fn optimize_cloudinary_url(url: &str, options: &OptimizeOptions) -> String {
    if !is_cloudinary_url(url) {
        return url.to_string();
    }

    let parts: Vec<&str> = url.splitn(2, "/upload/").collect();
    if parts.len() != 2 || parts[1].contains("/upload/") {
        return url.to_string();
    }

    let mut transformations = vec![format!("q_{}", options.quality)];

    match (options.width, options.height) {
        (Some(width), Some(height)) => {
            transformations.push(format!("c_fill,w_{},h_{},g_face", width, height));
        }
        (Some(width), None) => {
            transformations.push(format!("w_{}", width));
        }
        (None, Some(height)) => {
            transformations.push(format!("h_{}", height));
        }
        (None, None) => {}
    }

    if options.fetch_format {
        transformations.push("f_auto".to_string());
    }

    format!("{}/upload/{}/{}", parts[0], transformations.join(","), parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN_URL: &str = "https://res.cloudinary.com/demo/image/upload/v123/profile.jpg";

    #[test]
    fn test_inserts_transformation_segment() {
        let options = OptimizeOptions {
            width: Some(400),
            height: Some(300),
            ..Default::default()
        };

        let optimized = optimize_cloudinary_url(CDN_URL, &options);

        assert_eq!(
            optimized,
            "https://res.cloudinary.com/demo/image/upload/q_auto,c_fill,w_400,h_300,g_face,f_auto/v123/profile.jpg"
        );
    }

    #[test]
    fn test_width_only() {
        let options = OptimizeOptions {
            width: Some(200),
            height: None,
            ..Default::default()
        };

        let optimized = optimize_cloudinary_url(CDN_URL, &options);

        assert!(optimized.contains("/upload/q_auto,w_200,f_auto/"));
        assert!(!optimized.contains("c_fill"));
    }

    #[test]
    fn test_non_cdn_url_unchanged() {
        let url = "https://example.com/images/profile.jpg";

        assert_eq!(
            optimize_cloudinary_url(url, &OptimizeOptions::default()),
            url
        );
    }

    #[test]
    fn test_cdn_url_without_upload_marker_unchanged() {
        let url = "https://res.cloudinary.com/demo/image/fetch/profile.jpg";

        assert_eq!(
            optimize_cloudinary_url(url, &OptimizeOptions::default()),
            url
        );
    }

    #[test]
    fn test_is_cloudinary_url() {
        assert!(is_cloudinary_url(CDN_URL));
        assert!(is_cloudinary_url("http://cloudinary.com/x.png"));
        assert!(!is_cloudinary_url("https://example.com/x.png"));
    }
}
