// End-to-end tests for the Text-to-Speech API
//
// Each test boots the real router on an ephemeral port with its own
// temporary storage and public directories, and a stub synthesis provider
// standing in for Google Translate. Tests share no state and run in parallel.

mod test_download;
mod test_languages;
