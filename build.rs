fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    #[allow(clippy::expect_used)]
    built::write_built_file().expect("Failed to acquire build-time information");
}
