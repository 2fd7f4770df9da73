use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=ZXING_LIB_DIR");
    println!("cargo:rerun-if-env-changed=ZXING_LIB_NAME");
    println!("cargo:rerun-if-env-changed=ZXING_STATIC");

    // Without `link` the crate only declares types; nothing to resolve.
    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    if let Ok(dir) = env::var("ZXING_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }

    let name = env::var("ZXING_LIB_NAME").unwrap_or_else(|_| "ZXing".to_string());
    let kind = if env::var_os("ZXING_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={kind}={name}");

    // A static zxing-cpp still needs the C++ runtime.
    if kind == "static" {
        let target = env::var("TARGET").unwrap_or_default();
        if target.contains("apple") {
            println!("cargo:rustc-link-lib=dylib=c++");
        } else if !target.contains("msvc") {
            println!("cargo:rustc-link-lib=dylib=stdc++");
        }
    }
}
