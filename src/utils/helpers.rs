use std::path::Path;

/// Media type the service uses for pre-processed OCR packages.
pub const OCR_PACKAGE_CONTENT_TYPE: &str = "application/kiraocr";

pub fn get_content_type(file_path: &Path) -> &'static str {
    match file_path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("tiff") | Some("tif") => "image/tiff",
        Some("bmp") => "image/bmp",
        Some("txt") => "text/plain",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("kiraocr") | Some("zuvaocr") => OCR_PACKAGE_CONTENT_TYPE,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(get_content_type(Path::new("/docs/lease.PDF")), "application/pdf");
        assert_eq!(get_content_type(Path::new("scan.tif")), "image/tiff");
        assert_eq!(get_content_type(Path::new("a.zuvaocr")), OCR_PACKAGE_CONTENT_TYPE);
        assert_eq!(get_content_type(Path::new("noext")), "application/octet-stream");
    }
}
