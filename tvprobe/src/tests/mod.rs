mod fake;

pub(crate) use fake::FakeBackend;
