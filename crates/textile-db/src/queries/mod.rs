mod reading_tasks;
