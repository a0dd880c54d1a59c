mod helpers;
mod projects;
mod tasks;
