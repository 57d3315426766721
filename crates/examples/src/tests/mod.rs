mod gallery;
mod keylog;
