fn main() {
    // ESP-IDF link arguments and sysenv are only meaningful when building
    // the firmware image; host builds (tests, simulation) skip them.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
