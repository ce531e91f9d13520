#![no_main]
use libfuzzer_sys::fuzz_target;
use lvlog::fmt::Affixes;
use lvlog::{Template, TokenScope};

fuzz_target!(|data: &str| {
    // Must not panic on any template string
    let Ok(template) = Template::parse(data) else {
        return;
    };

    // Accepted templates render under both scopes and re-parse from their source
    let affixes = Affixes::new("{{suffix}}", "%s");
    let _ = template.render(data, &affixes, TokenScope::Line);
    let _ = template.render(data, &affixes, TokenScope::Template);
    assert_eq!(Template::parse(template.as_str()).as_ref(), Ok(&template));
});
