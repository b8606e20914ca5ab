use lazy_static::lazy_static;
use std::{fs, path::PathBuf};

macro_rules! generate_structs {
    ($($file:ident),+) => {
        $(
            #[allow(non_camel_case_types)]
            pub struct $file {
                pub test_content: String,
                /// Fragments that must not survive cleaning.
                pub noise: Vec<String>,
                /// Fragments that must survive cleaning verbatim.
                pub content: Vec<String>,
            }
            impl $file {
                pub fn load() -> Self {
                    let file_name = format!("{}.toml", stringify!($file).to_lowercase());
                    let cargo_manifest_dir = env!("CARGO_MANIFEST_DIR");
                    let file_path = PathBuf::from(cargo_manifest_dir)
                        .join("src")
                        .join("text_utils")
                        .join("test_text")
                        .join("files")
                        .join(file_name);

                    let content = fs::read_to_string(&file_path).expect("Failed to read file");
                    let data: toml::Value = toml::from_str(&content).expect("Failed to parse TOML");

                    Self {
                        test_content: data["test_content"].as_str().unwrap().to_string(),
                        noise: string_array(&data, "noise"),
                        content: string_array(&data, "content"),
                    }
                }
            }
        )+
    };
}

fn string_array(data: &toml::Value, key: &str) -> Vec<String> {
    data.get(key)
        .and_then(|value| value.as_array())
        .map(|array| {
            array
                .iter()
                .map(|s| s.as_str().unwrap().to_string())
                .collect()
        })
        .unwrap_or_default()
}

generate_structs!(Ocr_Notes);
generate_structs!(Plain_Prose);

lazy_static! {
    pub static ref OCR_NOTES: Ocr_Notes = Ocr_Notes::load();
    pub static ref PLAIN_PROSE: Plain_Prose = Plain_Prose::load();
}
