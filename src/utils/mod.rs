pub(crate) mod inflection;
